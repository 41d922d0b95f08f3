//! # Invoice Document
//!
//! HTML rendition of an invoice, printed to PDF by [`crate::pdf`] and used as
//! the email body on delivery.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Zevar Club                                                             │
//! │  address · city | GST No · phones | website                            │
//! │                                                                         │
//! │  Customer Details                         Invoice Details               │
//! │  Name / Phone / Email / Address / Mode    Invoice # / Date              │
//! │                                                                         │
//! │  #  Item            MRP     Sale Price  Qty   Total                     │
//! │  1  Gold Ring   1,500.00    1,000.00      2   2,000.00                  │
//! │                                                                         │
//! │                                  Taxable        1,941.75                │
//! │                                  CGST (1.5%)       29.13                │
//! │                                  SGST (1.5%)       29.13                │
//! │                                  Grand Total    2,000.01                │
//! │                                                                         │
//! │           Thank you for shopping with Zevar Club!                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use askama::Template;
use chrono::FixedOffset;

use zevar_core::{Invoice, GST_RATE};

use crate::config::StoreProfile;
use crate::error::ServiceResult;

/// The counter runs on Indian Standard Time.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// `templates/invoice.html`; every interpolated value is HTML-escaped.
#[derive(Template)]
#[template(path = "invoice.html")]
pub struct InvoiceTemplate<'a> {
    pub invoice: &'a Invoice,
    pub store: &'a StoreProfile,
    pub phones: String,
    pub date: String,
    /// Rate label for each of CGST and SGST, e.g. `1.5%`.
    pub gst_half: String,
}

impl<'a> InvoiceTemplate<'a> {
    pub fn new(invoice: &'a Invoice, store: &'a StoreProfile) -> Self {
        InvoiceTemplate {
            invoice,
            store,
            phones: store.phones.join(", "),
            date: invoice_date(invoice),
            gst_half: GST_RATE.half().label(),
        }
    }
}

/// Date printed on the invoice, `dd/mm/yyyy` in IST.
pub fn invoice_date(invoice: &Invoice) -> String {
    match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => invoice.created_at.with_timezone(&ist).format("%d/%m/%Y").to_string(),
        None => invoice.created_at.format("%d/%m/%Y").to_string(),
    }
}

/// Renders the complete HTML document for an invoice.
pub fn render_invoice_html(invoice: &Invoice, store: &StoreProfile) -> ServiceResult<String> {
    Ok(InvoiceTemplate::new(invoice, store).render()?)
}
