//! # Application State
//!
//! Shared between every handler via axum's `State` extractor.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppState (Clone, all fields behind Arc)                                │
//! │                                                                         │
//! │  db        ── products, invoices, stock                                 │
//! │  session   ── Mutex<BillingSession>: one counter, one cart              │
//! │  renderer  ── invoice → PDF                                             │
//! │  pdf       ── raw HTML → PDF for /generate-pdf                          │
//! │  mailer    ── /send-email and invoice delivery (None without SMTP)      │
//! │  archive   ── Drive upload (None when disabled)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session lock is held for a whole scan or submit, so operations on
//! the cart never interleave.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use zevar_core::{
    BillingSession, Collaborators, InvoiceArchive, InvoiceDelivery, InvoiceRenderer,
};
use zevar_db::Database;
use zevar_services::{
    ChromiumPdfEngine, DriveArchive, EmailDelivery, Mailer, PdfEngine, PdfInvoiceRenderer,
    SmtpMailer, StoreProfile,
};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub session: Arc<Mutex<BillingSession>>,
    pub store: StoreProfile,
    pub renderer: Arc<dyn InvoiceRenderer>,
    pub pdf: Arc<dyn PdfEngine>,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub delivery: Option<Arc<dyn InvoiceDelivery>>,
    pub archive: Option<Arc<dyn InvoiceArchive>>,
}

impl AppState {
    /// Wires the production integrations from configuration.
    ///
    /// SMTP and Drive are optional: a missing or broken setup is logged
    /// and the integration is left out.
    pub fn from_config(db: Database, config: &AppConfig) -> Self {
        let pdf: Arc<dyn PdfEngine> = Arc::new(ChromiumPdfEngine::from_config(&config.pdf));

        let mailer: Option<Arc<dyn Mailer>> =
            match SmtpMailer::new(&config.smtp, &config.store.name) {
                Ok(mailer) => Some(Arc::new(mailer)),
                Err(e) => {
                    warn!("Email disabled: {}", e);
                    None
                }
            };

        let archive: Option<Arc<dyn InvoiceArchive>> = if config.drive.enabled {
            match DriveArchive::new(&config.drive) {
                Ok(archive) => Some(Arc::new(archive)),
                Err(e) => {
                    warn!("Drive archive disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self::new(db, config.store.clone(), pdf, mailer, archive)
    }

    /// Builds state from explicit integrations. The invoice renderer and
    /// email delivery are derived from `pdf` and `mailer`.
    pub fn new(
        db: Database,
        store: StoreProfile,
        pdf: Arc<dyn PdfEngine>,
        mailer: Option<Arc<dyn Mailer>>,
        archive: Option<Arc<dyn InvoiceArchive>>,
    ) -> Self {
        let renderer: Arc<dyn InvoiceRenderer> =
            Arc::new(PdfInvoiceRenderer::new(pdf.clone(), store.clone()));
        let delivery = mailer.clone().map(|mailer| {
            Arc::new(EmailDelivery::new(mailer, store.clone())) as Arc<dyn InvoiceDelivery>
        });

        info!(
            email = mailer.is_some(),
            archive = archive.is_some(),
            "Billing integrations ready"
        );

        AppState {
            db,
            session: Arc::new(Mutex::new(BillingSession::new())),
            store,
            renderer,
            pdf,
            mailer,
            delivery,
            archive,
        }
    }

    /// Borrows the collaborators a submission needs.
    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            store: &self.db,
            renderer: self.renderer.as_ref(),
            delivery: self.delivery.as_deref(),
            archive: self.archive.as_deref(),
        }
    }
}
