//! # Billing Collaborators
//!
//! Wires [`Database`] into the billing session: catalogue lookups for scans,
//! invoice persistence and stock decrements for submissions.

use async_trait::async_trait;
use tracing::warn;

use zevar_core::{
    CollaboratorError, Invoice, InvoiceStore, ProductLookup, ProductQuote, StockDecrement,
    StockUpdateOutcome,
};

use crate::error::DbError;
use crate::pool::Database;

#[async_trait]
impl ProductLookup for Database {
    async fn find_by_code(&self, code: &str) -> Result<Option<ProductQuote>, CollaboratorError> {
        let product = self.products().get_by_code(code).await?;
        Ok(product.map(|p| p.quote()))
    }
}

#[async_trait]
impl InvoiceStore for Database {
    async fn save_invoice(&self, invoice: &Invoice) -> Result<(), CollaboratorError> {
        self.invoices().insert(invoice).await?;
        Ok(())
    }

    /// Each decrement is its own statement; a failure leaves earlier ones applied.
    async fn decrement_stock(&self, requests: &[StockDecrement]) -> Vec<StockUpdateOutcome> {
        let products = self.products();
        let mut outcomes = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = match products.update_stock(&request.code, -request.delta).await {
                Ok(remaining) => StockUpdateOutcome::applied(request, remaining),
                Err(DbError::NotFound { .. }) => StockUpdateOutcome::missing(request),
                Err(e) => {
                    warn!(code = %request.code, error = %e, "Stock decrement failed");
                    StockUpdateOutcome::failed(request, e.to_string())
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
