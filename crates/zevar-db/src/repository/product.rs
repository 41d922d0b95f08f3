//! # Product Repository
//!
//! Database operations for the catalogue.
//!
//! ## Key Operations
//! - Lookup by barcode (the scan path)
//! - Listing for the catalogue screen
//! - Inserting products (seed binary, tests)
//! - Stock adjustments after a sale
//!
//! ## Code Normalization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scanner sends: "  zc-1001\n"                                          │
//! │       │                                                                 │
//! │       ▼  normalize_code (trim + uppercase)                             │
//! │  "ZC-1001"                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  products.code = 'ZC-1001'  ← stored normalized on insert              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both sides are normalized, so a plain equality match is enough.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use zevar_core::validation::{validate_code, validate_price_cents, validate_product_name};
use zevar_core::{normalize_code, Product};

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str =
    "id, code, name, list_price_cents, unit_price_cents, stock_qty, created_at, updated_at";

/// Input for creating a catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub list_price_cents: i64,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub stock_qty: i64,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Scan path
/// let product = repo.get_by_code("ZC-1001").await?;
///
/// // After a sale of two units
/// let remaining = repo.update_stock("ZC-1001", -2).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its barcode.
    ///
    /// ## Arguments
    /// * `code` - Barcode, normalized here before matching
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No product carries this code
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let code = normalize_code(code);

        debug!(code = %code, "Looking up product");

        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ?1"
        ))
        .bind(&code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products sorted by name.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name, code LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Counts catalogue entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts a new product.
    ///
    /// ## Validation
    /// - Code is normalized and must be non-blank without spaces
    /// - Name must be non-empty
    /// - Prices must not be negative
    ///
    /// ## Errors
    /// * `DbError::Validation` - Input rejected
    /// * `DbError::UniqueViolation` - Code already exists
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        let code = validate_code(&new.code)?;
        validate_product_name(&new.name)?;
        validate_price_cents("list_price", new.list_price_cents)?;
        validate_price_cents("unit_price", new.unit_price_cents)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            code,
            name: new.name.trim().to_string(),
            list_price_cents: new.list_price_cents,
            unit_price_cents: new.unit_price_cents,
            stock_qty: new.stock_qty,
            created_at: now,
            updated_at: now,
        };

        debug!(code = %product.code, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, code, name, list_price_cents, unit_price_cents,
                stock_qty, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.list_price_cents)
        .bind(product.unit_price_cents)
        .bind(product.stock_qty)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } if field == "products.code" => {
                DbError::duplicate("code", &product.code)
            }
            other => other,
        })?;

        Ok(product)
    }

    /// Adjusts stock level by `delta` (negative for sales).
    ///
    /// Stock may go below zero; the counter never refuses a sale because
    /// the shelf count is off.
    ///
    /// ## Returns
    /// * `Ok(remaining)` - New stock level
    /// * `Err(DbError::NotFound)` - No product with this code
    pub async fn update_stock(&self, code: &str, delta: i64) -> DbResult<i64> {
        let code = normalize_code(code);

        debug!(code = %code, delta = %delta, "Updating stock");

        let remaining: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET
                stock_qty = stock_qty + ?2,
                updated_at = ?3
            WHERE code = ?1
            RETURNING stock_qty
            "#,
        )
        .bind(&code)
        .bind(delta)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        remaining.ok_or_else(|| DbError::not_found("Product", code))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn ring() -> NewProduct {
        NewProduct {
            code: " zc-1001 ".into(),
            name: "Gold Ring".into(),
            list_price_cents: 150_000,
            unit_price_cents: 100_000,
            stock_qty: 5,
        }
    }

    async fn setup() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    #[tokio::test]
    async fn test_insert_normalizes_code() {
        let repo = setup().await;
        let product = repo.insert(&ring()).await.unwrap();
        assert_eq!(product.code, "ZC-1001");

        let found = repo.get_by_code("zc-1001").await.unwrap().unwrap();
        assert_eq!(found.id, product.id);
        assert_eq!(found.name, "Gold Ring");
        assert_eq!(found.unit_price_cents, 100_000);

        let by_id = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(by_id.code, "ZC-1001");
    }

    #[tokio::test]
    async fn test_unknown_code_is_none() {
        let repo = setup().await;
        assert!(repo.get_by_code("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let repo = setup().await;
        repo.insert(&ring()).await.unwrap();

        let err = repo.insert(&ring()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "code"));
    }

    #[tokio::test]
    async fn test_insert_validation() {
        let repo = setup().await;

        let mut blank_name = ring();
        blank_name.name = "   ".into();
        assert!(matches!(
            repo.insert(&blank_name).await,
            Err(DbError::Validation(_))
        ));

        let mut negative = ring();
        negative.unit_price_cents = -1;
        assert!(matches!(
            repo.insert(&negative).await,
            Err(DbError::Validation(_))
        ));

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_stock_may_go_negative() {
        let repo = setup().await;
        repo.insert(&ring()).await.unwrap();

        assert_eq!(repo.update_stock("ZC-1001", -3).await.unwrap(), 2);
        assert_eq!(repo.update_stock("zc-1001", -4).await.unwrap(), -2);

        let err = repo.update_stock("MISSING", -1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let repo = setup().await;
        repo.insert(&ring()).await.unwrap();
        repo.insert(&NewProduct {
            code: "ZC-2001".into(),
            name: "Anklet".into(),
            list_price_cents: 0,
            unit_price_cents: 45_000,
            stock_qty: 0,
        })
        .await
        .unwrap();

        let products = repo.list(10).await.unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Anklet", "Gold Ring"]);

        assert_eq!(repo.list(1).await.unwrap().len(), 1);
    }
}
