//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler -> Result<Json<T>, ApiError>                                   │
//! │                                                                         │
//! │  CoreError::NotFound        ──► 404 NOT_FOUND                           │
//! │  CoreError::InvalidProduct  ──► 422 INVALID_PRODUCT                     │
//! │  CoreError::Validation      ──► 400 VALIDATION_ERROR                    │
//! │  CoreError::Lookup          ──► 503 LOOKUP_FAILED                       │
//! │  CoreError::Persistence     ──► 500 PERSISTENCE_ERROR                   │
//! │  DbError::*                 ──► 404 / 400 / 500 DATABASE_ERROR          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The body is always:
//! ```json
//! { "code": "NOT_FOUND", "message": "Product not found: ZC-1001" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use zevar_core::CoreError;
use zevar_db::DbError;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Catalogue entry unusable for billing (422)
    InvalidProduct,

    /// Input validation failed (400)
    ValidationError,

    /// Invoice could not be saved (500)
    PersistenceError,

    /// Catalogue unreachable (503)
    LookupFailed,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidProduct => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::LookupFailed => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::PersistenceError | ErrorCode::DatabaseError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, message),
            CoreError::InvalidProduct { .. } => ApiError::new(ErrorCode::InvalidProduct, message),
            CoreError::Validation(_) => ApiError::new(ErrorCode::ValidationError, message),
            CoreError::Lookup(_) => ApiError::new(ErrorCode::LookupFailed, message),
            CoreError::Persistence(e) => {
                tracing::error!("Invoice persistence failed: {}", e);
                ApiError::new(ErrorCode::PersistenceError, message)
            }
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                ApiError::validation(format!("{} '{}' already exists", field, value))
            }
            DbError::Validation(e) => ApiError::validation(e.to_string()),
            DbError::CheckViolation { message } => ApiError::validation(message),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
