//! # SQLite Handle
//!
//! Opens the billing database and hands out repositories over one pool.
//!
//! ```text
//! billing.toml [database].path ──► DbConfig::new(path)
//!                                        │
//!                                        ▼
//!                    Database::new ── mkdir -p, open (WAL), migrate
//!                                        │
//!                     ┌──────────────────┴──────────────────┐
//!                     ▼                                     ▼
//!              products()                            invoices()
//!      scan lookups, stock decrements          saved invoices, listings
//! ```
//!
//! The file is opened in WAL mode, so a catalogue lookup at the counter is
//! not blocked while an invoice is being written.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::invoice::InvoiceRepository;
use crate::repository::product::ProductRepository;

const IN_MEMORY: &str = ":memory:";

/// Where the billing database lives and how many connections it gets.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,
    /// One counter rarely needs more than a handful.
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// A private, empty database per call; used by tests.
    ///
    /// Each SQLite `:memory:` connection is its own database, so the pool
    /// is held to a single connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    /// The sqlx URL; a file database is created on first open.
    fn connect_url(&self) -> DbResult<String> {
        if self.is_in_memory() {
            return Ok("sqlite::memory:".to_string());
        }

        if let Some(dir) = self.database_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        }
        Ok(format!("sqlite://{}?mode=rwc", self.database_path.display()))
    }
}

/// Pool-backed database handle. Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database and brings its schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening billing database");

        let options = SqliteConnectOptions::from_str(&config.connect_url()?)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        debug!(max_connections = config.max_connections, "Pool ready");

        migrations::run_migrations(&pool).await?;
        info!("Billing database ready");

        Ok(Database { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Catalogue access: scan lookups and stock.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.pool.clone())
    }

    /// Waits for open connections to finish; later queries fail.
    pub async fn close(&self) {
        info!("Closing billing database");
        self.pool.close().await;
    }

    /// `true` if the pool can still run a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("billing.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        assert!(path.exists());
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_reopening_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billing.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        sqlx::query("CREATE TABLE marker (id INTEGER)")
            .execute(db.pool())
            .await
            .unwrap();
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM marker")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0, 0);
    }

    #[test]
    fn test_connect_url() {
        assert_eq!(DbConfig::in_memory().connect_url().unwrap(), "sqlite::memory:");
        assert!(DbConfig::in_memory().is_in_memory());

        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("billing.db"));
        assert!(!config.is_in_memory());
        let url = config.connect_url().unwrap();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("billing.db?mode=rwc"));
    }
}
