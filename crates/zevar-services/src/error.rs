//! # Service Error Types
//!
//! Errors from the outbound integrations: Chromium, SMTP and Google Drive.
//!
//! Inside a submission these flatten into [`CollaboratorError`] and end up as
//! warnings; the standalone `/send-email` and `/generate-pdf` endpoints map
//! them to HTTP responses.

use thiserror::Error;
use zevar_core::CollaboratorError;

/// Outbound integration errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The integration is switched off in configuration.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// An email address could not be parsed.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The MIME message could not be assembled.
    #[error("Failed to build message: {0}")]
    MessageBuild(String),

    /// The SMTP relay rejected or dropped the message.
    #[error("Failed to send email: {0}")]
    Smtp(String),

    /// Chromium exited without producing a PDF.
    #[error("PDF engine failed: {0}")]
    PdfEngine(String),

    /// Chromium did not finish in time and was killed.
    #[error("PDF engine timed out after {0} ms")]
    PdfTimeout(u128),

    /// The Drive API answered with a non-success status.
    #[error("Drive upload rejected ({status}): {body}")]
    DriveRejected { status: u16, body: String },

    /// The invoice template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ServiceError> for CollaboratorError {
    fn from(err: ServiceError) -> Self {
        CollaboratorError::new(err.to_string())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
