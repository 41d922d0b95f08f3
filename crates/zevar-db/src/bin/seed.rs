//! # Seed Data Generator
//!
//! Populates the catalogue with jewellery products for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p zevar-db --bin seed
//!
//! # Specify database path
//! cargo run -p zevar-db --bin seed -- --db ./data/billing.db
//! ```
//!
//! ## Generated Products
//! Each collection contributes one product per metal:
//! - Code: `{COLLECTION}-{METAL}-{INDEX}`
//! - MRP a fixed markup above the selling price
//! - Stock between 0 and 9

use std::env;
use zevar_db::{Database, DbConfig, NewProduct};

/// Collection prefix, piece name and base selling price in rupees.
const COLLECTIONS: &[(&str, &str, i64)] = &[
    ("RNG", "Ring", 1_000),
    ("ERG", "Earrings", 1_450),
    ("NKL", "Necklace", 4_999),
    ("BNG", "Bangle", 2_250),
    ("ANK", "Anklet", 450),
    ("PND", "Pendant", 1_799),
    ("NSP", "Nose Pin", 299),
    ("MNG", "Mangalsutra", 3_499),
];

/// Metal code, display name and price multiplier in percent.
const METALS: &[(&str, &str, i64)] = &[
    ("SLV", "Silver", 100),
    ("GPL", "Gold Plated", 140),
    ("OXD", "Oxidised", 80),
    ("KND", "Kundan", 220),
];

/// MRP markup over the selling price, in percent.
const MRP_MARKUP: i64 = 40;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./zevar_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Zevar Billing Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./zevar_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Zevar Billing Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for (collection_idx, (collection, piece, base_rupees)) in COLLECTIONS.iter().enumerate() {
        for (metal_idx, (metal, metal_name, multiplier)) in METALS.iter().enumerate() {
            let product = generate_product(
                collection,
                piece,
                *base_rupees,
                metal,
                metal_name,
                *multiplier,
                collection_idx * METALS.len() + metal_idx,
            );

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.code, e);
                continue;
            }
            generated += 1;
        }
    }

    println!("✓ Generated {} products", generated);
    db.close().await;
    Ok(())
}

fn generate_product(
    collection: &str,
    piece: &str,
    base_rupees: i64,
    metal: &str,
    metal_name: &str,
    multiplier: i64,
    index: usize,
) -> NewProduct {
    let unit_price_cents = base_rupees * 100 * multiplier / 100;
    let list_price_cents = unit_price_cents * (100 + MRP_MARKUP) / 100;

    NewProduct {
        code: format!("{}-{}-{:03}", collection, metal, index + 1),
        name: format!("{} {}", metal_name, piece),
        list_price_cents,
        unit_price_cents,
        stock_qty: (index % 10) as i64,
    }
}
