//! # Zevar Billing API
//!
//! HTTP front of the billing counter. Handlers are thin: they lock the
//! shared [`BillingSession`](zevar_core::BillingSession), call into
//! `zevar-core`, and map errors to the JSON envelope in [`error`].
//!
//! ## Module Structure
//! ```text
//! zevar_billing_api/
//! ├── config.rs     - AppConfig (TOML + ZEVAR_* overrides)
//! ├── error.rs      - ApiError / ErrorCode
//! ├── handlers/     - session, catalog, documents, health
//! ├── startup.rs    - router + Application lifecycle
//! ├── state.rs      - AppState shared by handlers
//! └── telemetry.rs  - tracing subscriber
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod startup;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use startup::{router, Application, StartupError};
pub use state::AppState;
