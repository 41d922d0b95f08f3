//! Billing API entry point.
//!
//! ```text
//! billing-api [--config <path>]
//! ```

use std::path::PathBuf;
use tracing::info;

use zevar_billing_api::telemetry::init_tracing;
use zevar_billing_api::{AppConfig, Application};

fn print_help() {
    println!("Zevar billing API");
    println!();
    println!("USAGE:");
    println!("    billing-api [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Config file (default: platform config dir)");
    println!("    -h, --help             Print help information");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).ok_or("--config requires a path")?;
                config_path = Some(PathBuf::from(path));
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(2);
            }
        }
    }

    init_tracing();
    info!("Starting Zevar billing API...");

    let config = AppConfig::load(config_path)?;
    info!(
        address = %config.server.bind_address(),
        store = %config.store.name,
        "Configuration loaded"
    );

    let application = Application::build(config).await?;
    info!(port = application.port(), "Billing API ready");

    application.run_until_stopped().await?;
    Ok(())
}
