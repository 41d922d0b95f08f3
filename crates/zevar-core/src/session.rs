//! # Billing Session
//!
//! One counter's in-progress bill: the cart, the customer being served, and
//! the two operations that change them (scan and submit).
//!
//! ## Collaborators
//! The session never performs I/O itself. Everything outside the cart is a
//! trait object handed in by the caller:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         BillingSession                                  │
//! │                                                                         │
//! │   scan(token) ─────────────► ProductLookup::find_by_code                │
//! │                                                                         │
//! │   submit() ──┬─(b)─────────► InvoiceStore::save_invoice     FATAL       │
//! │              ├─(c)─────────► InvoiceStore::decrement_stock  per-item    │
//! │              ├─(d)─────────► InvoiceRenderer::render        warning     │
//! │              │    └────────► InvoiceDelivery::deliver       warning     │
//! │              │    └────────► InvoiceArchive::archive        warning     │
//! │              └─(e) clear cart + customer contact                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calls are awaited one after another. Callers that share a session across
//! tasks must hold a lock for the whole operation so scans and submissions
//! never interleave.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};
use ts_rs::TS;

use crate::cart::{Cart, LineItem};
use crate::error::{CollaboratorError, CoreError, CoreResult};
use crate::types::{
    Customer, Invoice, InvoiceTotals, ProductQuote, RenderedDocument, StockDecrement,
    StockUpdateOutcome, StockUpdateStatus,
};
use crate::validation::{validate_customer_details, validate_scan_token, validate_submission};

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Resolves a normalized code to billable product attributes.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// `Ok(None)` means the code is unknown.
    async fn find_by_code(&self, code: &str) -> Result<Option<ProductQuote>, CollaboratorError>;
}

/// Durable storage for invoices and stock levels.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn save_invoice(&self, invoice: &Invoice) -> Result<(), CollaboratorError>;

    /// Applies each decrement independently and reports one outcome per
    /// request, in request order. Already-applied decrements are never
    /// rolled back when a later one fails.
    async fn decrement_stock(&self, requests: &[StockDecrement]) -> Vec<StockUpdateOutcome>;
}

/// Turns an invoice into a printable document.
#[async_trait]
pub trait InvoiceRenderer: Send + Sync {
    async fn render(&self, invoice: &Invoice) -> Result<RenderedDocument, CollaboratorError>;
}

/// Sends a rendered invoice to the customer.
#[async_trait]
pub trait InvoiceDelivery: Send + Sync {
    async fn deliver(
        &self,
        invoice: &Invoice,
        document: &RenderedDocument,
        destination: &str,
    ) -> Result<(), CollaboratorError>;
}

/// Keeps a copy of every rendered invoice somewhere off the counter.
#[async_trait]
pub trait InvoiceArchive: Send + Sync {
    /// Returns the archive's identifier for the stored file.
    async fn archive(&self, document: &RenderedDocument) -> Result<String, CollaboratorError>;
}

/// Everything a submission talks to. Delivery and archive are optional.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub store: &'a dyn InvoiceStore,
    pub renderer: &'a dyn InvoiceRenderer,
    pub delivery: Option<&'a dyn InvoiceDelivery>,
    pub archive: Option<&'a dyn InvoiceArchive>,
}

// =============================================================================
// Submission Report
// =============================================================================

/// A non-fatal problem during submission.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum SubmissionWarning {
    #[error("Stock for {code} was not updated: {message}")]
    StockUpdate { code: String, message: String },

    #[error("Invoice document could not be rendered: {message}")]
    Render { message: String },

    #[error("Invoice could not be delivered to {destination}: {message}")]
    Delivery { destination: String, message: String },

    #[error("Invoice could not be archived: {message}")]
    Archive { message: String },
}

/// What a successful submission did.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionReport {
    pub invoice: Invoice,
    /// One entry per invoice line, in line order.
    pub stock: Vec<StockUpdateOutcome>,
    pub document: Option<RenderedDocument>,
    pub delivered_to: Option<String>,
    pub archive_file_id: Option<String>,
    pub warnings: Vec<SubmissionWarning>,
}

impl SubmissionReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Read-only view of a session for the UI.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionView {
    pub items: Vec<LineItem>,
    pub customer: Customer,
    pub totals: InvoiceTotals,
    pub item_count: usize,
    pub total_quantity: i64,
}

// =============================================================================
// Billing Session
// =============================================================================

/// The cart and customer of one billing counter.
#[derive(Debug, Clone, Default)]
pub struct BillingSession {
    cart: Cart,
    customer: Customer,
}

impl BillingSession {
    pub fn new() -> Self {
        BillingSession::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn totals(&self) -> InvoiceTotals {
        self.cart.totals()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            items: self.cart.items().to_vec(),
            customer: self.customer.clone(),
            totals: self.cart.totals(),
            item_count: self.cart.len(),
            total_quantity: self.cart.total_quantity(),
        }
    }

    /// Replaces the customer details after checking their format.
    pub fn set_customer(&mut self, customer: Customer) -> CoreResult<()> {
        validate_customer_details(&customer)?;
        self.customer = customer;
        Ok(())
    }

    /// Drops every line without submitting.
    pub fn abandon_cart(&mut self) {
        info!(lines = self.cart.len(), "Cart abandoned");
        self.cart.clear();
    }

    /// Scans one token into the cart.
    ///
    /// ## Errors
    /// - `Validation` if the token is blank once normalized
    /// - `NotFound` if the catalogue does not know the code
    /// - `InvalidProduct` if the catalogue entry has no name or code
    /// - `Lookup` if the catalogue could not be asked
    ///
    /// The cart is untouched on every error.
    #[instrument(skip(self, lookup))]
    pub async fn scan(&mut self, token: &str, lookup: &dyn ProductLookup) -> CoreResult<LineItem> {
        let code = validate_scan_token(token)?;

        let quote = lookup
            .find_by_code(&code)
            .await
            .map_err(|e| CoreError::Lookup(e.to_string()))?
            .ok_or_else(|| CoreError::NotFound { code: code.clone() })?;

        let line = self.cart.add_quote(quote)?.clone();
        debug!(code = %line.code, quantity = line.quantity, "Scanned into cart");
        Ok(line)
    }

    /// Turns the cart into an invoice.
    ///
    /// ## Steps
    /// 1. validate (no side effects on failure)
    /// 2. compute totals
    /// 3. persist the invoice; failure aborts with the cart intact
    /// 4. decrement stock per line, best effort
    /// 5. render, then deliver and archive the document if possible
    /// 6. clear the cart and customer contact
    #[instrument(skip(self, collaborators), fields(lines = self.cart.len()))]
    pub async fn submit(&mut self, collaborators: Collaborators<'_>) -> CoreResult<SubmissionReport> {
        validate_submission(&self.cart, &self.customer)?;

        let totals = self.cart.totals();
        let now = Utc::now();
        let invoice = Invoice {
            id: uuid::Uuid::new_v4().to_string(),
            number: Invoice::number_for(now),
            customer: self.customer.trimmed(),
            lines: self.cart.snapshot(),
            totals,
            created_at: now,
        };

        if let Err(e) = collaborators.store.save_invoice(&invoice).await {
            error!(number = %invoice.number, error = %e, "Failed to save invoice");
            return Err(CoreError::Persistence(e.to_string()));
        }
        info!(
            number = %invoice.number,
            grand_total = %invoice.totals.grand_total,
            "Invoice saved"
        );

        let mut warnings = Vec::new();

        let requests: Vec<StockDecrement> = invoice
            .lines
            .iter()
            .map(|line| StockDecrement {
                code: line.code.clone(),
                delta: line.quantity,
            })
            .collect();
        let stock = collaborators.store.decrement_stock(&requests).await;
        for outcome in &stock {
            let message = match &outcome.status {
                StockUpdateStatus::Applied { .. } => continue,
                StockUpdateStatus::Missing => "product no longer in catalogue".to_string(),
                StockUpdateStatus::Failed { message } => message.clone(),
            };
            warnings.push(SubmissionWarning::StockUpdate {
                code: outcome.code.clone(),
                message,
            });
        }

        let mut delivered_to = None;
        let mut archive_file_id = None;
        let document = match collaborators.renderer.render(&invoice).await {
            Ok(document) => Some(document),
            Err(e) => {
                warnings.push(SubmissionWarning::Render {
                    message: e.to_string(),
                });
                None
            }
        };

        if let Some(document) = &document {
            if let (Some(delivery), Some(email)) =
                (collaborators.delivery, invoice.customer.email_address())
            {
                match delivery.deliver(&invoice, document, email).await {
                    Ok(()) => delivered_to = Some(email.to_string()),
                    Err(e) => warnings.push(SubmissionWarning::Delivery {
                        destination: email.to_string(),
                        message: e.to_string(),
                    }),
                }
            }

            if let Some(archive) = collaborators.archive {
                match archive.archive(document).await {
                    Ok(file_id) => archive_file_id = Some(file_id),
                    Err(e) => warnings.push(SubmissionWarning::Archive {
                        message: e.to_string(),
                    }),
                }
            }
        }

        for warning in &warnings {
            warn!(number = %invoice.number, "{}", warning);
        }

        self.cart.clear();
        self.customer.clear_contact();
        info!(number = %invoice.number, warnings = warnings.len(), "Submission complete");

        Ok(SubmissionReport {
            invoice,
            stock,
            document,
            delivered_to,
            archive_file_id,
            warnings,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use crate::types::PurchaseMode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // -------------------------------------------------------------------------
    // Mock collaborators
    // -------------------------------------------------------------------------

    struct MockCatalogue {
        products: HashMap<String, ProductQuote>,
        offline: bool,
    }

    impl MockCatalogue {
        fn new() -> Self {
            let mut products = HashMap::new();
            for (code, name, rupees) in [
                ("ZC-1001", "Kundan Necklace", 1000),
                ("ZC-1002", "Temple Jhumka", 450),
                ("ZC-0000", "", 10),
            ] {
                products.insert(
                    code.to_string(),
                    ProductQuote {
                        code: code.to_string(),
                        name: name.to_string(),
                        list_price: Money::from_rupees(rupees + 100),
                        unit_price: Money::from_rupees(rupees),
                    },
                );
            }
            MockCatalogue {
                products,
                offline: false,
            }
        }
    }

    #[async_trait]
    impl ProductLookup for MockCatalogue {
        async fn find_by_code(&self, code: &str) -> Result<Option<ProductQuote>, CollaboratorError> {
            if self.offline {
                return Err(CollaboratorError::new("catalogue offline"));
            }
            Ok(self.products.get(code).cloned())
        }
    }

    #[derive(Default)]
    struct MockStore {
        fail_save: bool,
        missing: Vec<String>,
        broken: Vec<String>,
        saved: Mutex<Vec<Invoice>>,
        decremented: Mutex<Vec<StockDecrement>>,
    }

    #[async_trait]
    impl InvoiceStore for MockStore {
        async fn save_invoice(&self, invoice: &Invoice) -> Result<(), CollaboratorError> {
            if self.fail_save {
                return Err(CollaboratorError::new("database is locked"));
            }
            self.saved.lock().unwrap().push(invoice.clone());
            Ok(())
        }

        async fn decrement_stock(&self, requests: &[StockDecrement]) -> Vec<StockUpdateOutcome> {
            requests
                .iter()
                .map(|request| {
                    if self.missing.contains(&request.code) {
                        StockUpdateOutcome::missing(request)
                    } else if self.broken.contains(&request.code) {
                        StockUpdateOutcome::failed(request, "disk I/O error")
                    } else {
                        self.decremented.lock().unwrap().push(request.clone());
                        StockUpdateOutcome::applied(request, 10 - request.delta)
                    }
                })
                .collect()
        }
    }

    struct MockRenderer {
        fail: bool,
    }

    #[async_trait]
    impl InvoiceRenderer for MockRenderer {
        async fn render(&self, invoice: &Invoice) -> Result<RenderedDocument, CollaboratorError> {
            if self.fail {
                return Err(CollaboratorError::new("chromium exited with status 1"));
            }
            Ok(RenderedDocument::pdf(
                invoice.document_filename(),
                b"%PDF-1.7".to_vec(),
            ))
        }
    }

    #[derive(Default)]
    struct MockDelivery {
        fail: bool,
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl InvoiceDelivery for MockDelivery {
        async fn deliver(
            &self,
            _invoice: &Invoice,
            _document: &RenderedDocument,
            destination: &str,
        ) -> Result<(), CollaboratorError> {
            if self.fail {
                return Err(CollaboratorError::new("smtp timeout"));
            }
            self.sent.lock().unwrap().push(destination.to_string());
            Ok(())
        }
    }

    struct MockArchive;

    #[async_trait]
    impl InvoiceArchive for MockArchive {
        async fn archive(&self, document: &RenderedDocument) -> Result<String, CollaboratorError> {
            Ok(format!("drive-{}", document.filename))
        }
    }

    fn collaborators<'a>(store: &'a MockStore, renderer: &'a MockRenderer) -> Collaborators<'a> {
        Collaborators {
            store,
            renderer,
            delivery: None,
            archive: None,
        }
    }

    async fn session_with_items(codes: &[&str]) -> BillingSession {
        let catalogue = MockCatalogue::new();
        let mut session = BillingSession::new();
        for code in codes {
            session.scan(code, &catalogue).await.unwrap();
        }
        session
    }

    fn named(name: &str) -> Customer {
        Customer {
            name: name.to_string(),
            ..Customer::default()
        }
    }

    // -------------------------------------------------------------------------
    // Scan
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_scan_normalizes_and_merges() {
        let catalogue = MockCatalogue::new();
        let mut session = BillingSession::new();

        session.scan(" zc-1001 ", &catalogue).await.unwrap();
        session.scan("ZC-1001", &catalogue).await.unwrap();
        let line = session.scan("zc-1001", &catalogue).await.unwrap();

        assert_eq!(line.quantity, 3);
        assert_eq!(session.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_scan_unknown_code_leaves_cart_unchanged() {
        let catalogue = MockCatalogue::new();
        let mut session = session_with_items(&["ZC-1001"]).await;
        let before = session.cart().clone();

        let err = session.scan("ZC-9999", &catalogue).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { ref code } if code == "ZC-9999"));
        assert_eq!(session.cart(), &before);
    }

    #[tokio::test]
    async fn test_scan_odd_token_is_not_found() {
        let catalogue = MockCatalogue::new();
        let mut session = BillingSession::new();

        let err = session.scan("zc 1001", &catalogue).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { ref code } if code == "ZC 1001"));

        let long = "Z".repeat(80);
        let err = session.scan(&long, &catalogue).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_scan_nameless_product_is_invalid() {
        let catalogue = MockCatalogue::new();
        let mut session = BillingSession::new();

        let err = session.scan("ZC-0000", &catalogue).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidProduct { .. }));
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_scan_blank_token_is_rejected_without_lookup() {
        let catalogue = MockCatalogue {
            offline: true,
            ..MockCatalogue::new()
        };
        let mut session = BillingSession::new();

        let err = session.scan("   ", &catalogue).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_scan_reports_lookup_failure() {
        let catalogue = MockCatalogue {
            offline: true,
            ..MockCatalogue::new()
        };
        let mut session = BillingSession::new();

        let err = session.scan("ZC-1001", &catalogue).await.unwrap_err();
        assert!(matches!(err, CoreError::Lookup(_)));
        assert!(session.cart().is_empty());
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_submit_without_name_touches_nothing() {
        let store = MockStore::default();
        let renderer = MockRenderer { fail: false };
        let mut session = session_with_items(&["ZC-1001"]).await;

        let err = session
            .submit(collaborators(&store, &renderer))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));
        assert!(store.saved.lock().unwrap().is_empty());
        assert_eq!(session.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_empty_cart_fails_validation() {
        let store = MockStore::default();
        let renderer = MockRenderer { fail: false };
        let mut session = BillingSession::new();
        session.set_customer(named("Asha")).unwrap();

        let err = session
            .submit(collaborators(&store, &renderer))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_persistence_failure_keeps_cart() {
        let store = MockStore {
            fail_save: true,
            ..MockStore::default()
        };
        let renderer = MockRenderer { fail: false };
        let mut session = session_with_items(&["ZC-1001", "ZC-1002"]).await;
        session.set_customer(named("Asha")).unwrap();

        let err = session
            .submit(collaborators(&store, &renderer))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Persistence(_)));
        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.customer().name, "Asha");
        assert!(store.decremented.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let store = MockStore::default();
        let renderer = MockRenderer { fail: false };
        let mut session = session_with_items(&["ZC-1001", "ZC-1001", "ZC-1002"]).await;
        session
            .set_customer(Customer {
                name: " Asha Verma ".into(),
                phone: "9470128088".into(),
                purchase_mode: PurchaseMode::Amazon,
                ..Customer::default()
            })
            .unwrap();

        let report = session
            .submit(collaborators(&store, &renderer))
            .await
            .unwrap();

        assert!(report.is_clean());
        assert!(report.invoice.number.starts_with("INV-"));
        assert_eq!(report.invoice.customer.name, "Asha Verma");
        assert_eq!(report.invoice.lines.len(), 2);
        assert_eq!(report.invoice.totals.grand_total.cents(), 245_000);
        assert_eq!(report.stock.len(), 2);
        assert!(report.stock.iter().all(StockUpdateOutcome::is_applied));
        assert_eq!(
            report.document.as_ref().map(|d| d.filename.clone()),
            Some(report.invoice.document_filename())
        );

        let decremented = store.decremented.lock().unwrap();
        assert_eq!(decremented[0], StockDecrement { code: "ZC-1001".into(), delta: 2 });
        assert_eq!(decremented[1], StockDecrement { code: "ZC-1002".into(), delta: 1 });

        assert!(session.cart().is_empty());
        assert!(session.customer().name.is_empty());
        assert!(session.customer().phone.is_empty());
        assert_eq!(session.customer().purchase_mode, PurchaseMode::Amazon);
    }

    #[tokio::test]
    async fn test_submit_stock_failures_are_warnings() {
        let store = MockStore {
            missing: vec!["ZC-1001".into()],
            broken: vec!["ZC-1002".into()],
            ..MockStore::default()
        };
        let renderer = MockRenderer { fail: false };
        let mut session = session_with_items(&["ZC-1001", "ZC-1002"]).await;
        session.set_customer(named("Asha")).unwrap();

        let report = session
            .submit(collaborators(&store, &renderer))
            .await
            .unwrap();

        assert_eq!(report.stock.len(), 2);
        assert_eq!(report.stock[0].status, StockUpdateStatus::Missing);
        assert!(matches!(report.stock[1].status, StockUpdateStatus::Failed { .. }));
        assert_eq!(report.warnings.len(), 2);
        assert!(report.document.is_some());
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_submit_render_failure_is_warning() {
        let store = MockStore::default();
        let renderer = MockRenderer { fail: true };
        let delivery = MockDelivery::default();
        let mut session = session_with_items(&["ZC-1002"]).await;
        session
            .set_customer(Customer {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                ..Customer::default()
            })
            .unwrap();

        let report = session
            .submit(Collaborators {
                delivery: Some(&delivery),
                ..collaborators(&store, &renderer)
            })
            .await
            .unwrap();

        assert!(report.document.is_none());
        assert!(matches!(report.warnings[0], SubmissionWarning::Render { .. }));
        // nothing to deliver without a document
        assert!(delivery.sent.lock().unwrap().is_empty());
        assert_eq!(store.saved.lock().unwrap().len(), 1);
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_submit_delivers_and_archives() {
        let store = MockStore::default();
        let renderer = MockRenderer { fail: false };
        let delivery = MockDelivery::default();
        let mut session = session_with_items(&["ZC-1002"]).await;
        session
            .set_customer(Customer {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                ..Customer::default()
            })
            .unwrap();

        let report = session
            .submit(Collaborators {
                delivery: Some(&delivery),
                archive: Some(&MockArchive),
                ..collaborators(&store, &renderer)
            })
            .await
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(report.delivered_to.as_deref(), Some("asha@example.com"));
        assert_eq!(
            report.archive_file_id,
            Some(format!("drive-{}.pdf", report.invoice.number))
        );
        assert_eq!(delivery.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_delivery_failure_is_warning() {
        let store = MockStore::default();
        let renderer = MockRenderer { fail: false };
        let delivery = MockDelivery {
            fail: true,
            ..MockDelivery::default()
        };
        let mut session = session_with_items(&["ZC-1002"]).await;
        session
            .set_customer(Customer {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                ..Customer::default()
            })
            .unwrap();

        let report = session
            .submit(Collaborators {
                delivery: Some(&delivery),
                ..collaborators(&store, &renderer)
            })
            .await
            .unwrap();

        assert!(report.delivered_to.is_none());
        assert_eq!(
            report.warnings,
            vec![SubmissionWarning::Delivery {
                destination: "asha@example.com".into(),
                message: "smtp timeout".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_set_customer_rejects_bad_email() {
        let mut session = BillingSession::new();
        let err = session
            .set_customer(Customer {
                email: "not-an-email".into(),
                ..Customer::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(session.customer(), &Customer::default());
    }

    #[tokio::test]
    async fn test_view_reflects_cart() {
        let session = session_with_items(&["ZC-1001", "ZC-1001"]).await;
        let view = session.view();
        assert_eq!(view.item_count, 1);
        assert_eq!(view.total_quantity, 2);
        assert_eq!(view.totals.grand_total.cents(), 200_001);
    }
}
