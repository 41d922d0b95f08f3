//! # zevar-services: Outbound Integrations
//!
//! Everything the billing counter talks to besides its own database:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       zevar-services                                    │
//! │                                                                         │
//! │  invoice_html ──► HTML invoice document (store header, items, GST)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pdf   ──► PdfEngine (headless Chromium)  ──► InvoiceRenderer impl      │
//! │  mail  ──► Mailer (SMTP via lettre)       ──► InvoiceDelivery impl      │
//! │  drive ──► Google Drive upload (reqwest)  ──► InvoiceArchive impl       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The collaborator traits come from `zevar-core`; a failure in any of these
//! integrations becomes a submission warning, never a lost invoice.

pub mod config;
pub mod drive;
pub mod error;
pub mod invoice_html;
pub mod mail;
pub mod pdf;

pub use config::{DriveConfig, PdfConfig, SmtpConfig, StoreProfile};
pub use drive::DriveArchive;
pub use error::{ServiceError, ServiceResult};
pub use invoice_html::render_invoice_html;
pub use mail::{EmailAttachment, EmailDelivery, Mailer, OutgoingEmail, SmtpMailer};
pub use pdf::{ChromiumPdfEngine, PdfEngine, PdfInvoiceRenderer};
