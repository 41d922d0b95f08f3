//! # Error Types
//!
//! Domain-specific error types for zevar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  zevar-core errors (this file)                                         │
//! │  ├── CoreError          - Scan / submission failures                   │
//! │  ├── ValidationError    - Input validation failures                    │
//! │  └── CollaboratorError  - What a lookup/store/renderer reports back    │
//! │                                                                         │
//! │  zevar-db errors        → DbError → CollaboratorError                  │
//! │  zevar-services errors  → ServiceError → CollaboratorError             │
//! │                                                                         │
//! │  billing-api errors                                                    │
//! │  └── ApiError           - What the browser sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Non-fatal problems during a submission are not errors at all; they are
//! collected as [`crate::session::SubmissionWarning`]s on the report.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Failures of a billing-session operation.
///
/// Only [`CoreError::Persistence`] can happen after a submission has started
/// touching collaborators; every other variant leaves the session exactly as
/// it was.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The scanned code does not resolve to a product.
    ///
    /// ## User Workflow
    /// ```text
    /// Scan "ZC-9999"
    ///      │
    ///      ▼
    /// lookup("ZC-9999") → None
    ///      │
    ///      ▼
    /// NotFound { code: "ZC-9999" }   (cart untouched)
    ///      │
    ///      ▼
    /// UI shows: "Item not found"
    /// ```
    #[error("Item not found: {code}")]
    NotFound { code: String },

    /// The catalogue returned a record that cannot be billed.
    #[error("Product record for '{code}' is invalid: {reason}")]
    InvalidProduct { code: String, reason: String },

    /// The lookup collaborator could not be reached at all.
    #[error("Product lookup failed: {0}")]
    Lookup(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The invoice record could not be written; the session is left intact.
    #[error("Could not save invoice: {0}")]
    Persistence(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Collaborator Error
// =============================================================================

/// Error reported by an external collaborator (catalogue, store, renderer,
/// mailer, archive).
///
/// Collaborators live in other crates with their own error enums; they
/// flatten into this message-carrying type at the trait boundary so the
/// session can report them without depending on those crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CollaboratorError(String);

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        CollaboratorError(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
