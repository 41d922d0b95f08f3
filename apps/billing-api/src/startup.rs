//! # Server Startup
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppConfig ──► Database::new (migrations) ──► AppState::from_config    │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │            TcpListener::bind ◄──────────────── router(state)           │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │  run_until_stopped: axum::serve ... until Ctrl+C / SIGTERM             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use zevar_db::{Database, DbConfig, DbError};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Database setup failed: {0}")]
    Database(#[from] DbError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the HTTP router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/session", get(handlers::get_session))
        .route("/api/session/scan", post(handlers::scan))
        .route("/api/session/customer", put(handlers::set_customer))
        .route("/api/session/cart", delete(handlers::abandon_cart))
        .route("/api/session/submit", post(handlers::submit))
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/{code}", get(handlers::get_product))
        .route("/api/invoices", get(handlers::list_invoices))
        .route("/api/invoices/{id}", get(handlers::get_invoice))
        .route("/send-email", post(handlers::send_email))
        .route("/generate-pdf", post(handlers::generate_pdf))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    pub async fn build(config: AppConfig) -> Result<Self, StartupError> {
        let db_path = config.database.resolved_path();
        info!(path = %db_path.display(), "Opening billing database");

        let db = Database::new(DbConfig::new(db_path)).await.map_err(|e| {
            error!("Failed to open database: {}", e);
            e
        })?;

        let state = AppState::from_config(db, &config);
        Self::with_state(&config.server.bind_address(), state).await
    }

    /// Binds `address` and serves `state`. Port `0` picks a free port.
    pub async fn with_state(address: &str, state: AppState) -> Result<Self, StartupError> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|source| StartupError::Bind {
                address: address.to_string(),
                source,
            })?;
        let port = listener.local_addr()?.port();

        info!("Listening on {}", port);

        Ok(Application {
            port,
            listener,
            router: router(state.clone()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let db = self.state.db.clone();

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        db.close().await;
        info!("Billing API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

// =============================================================================
// Router Tests
// =============================================================================
