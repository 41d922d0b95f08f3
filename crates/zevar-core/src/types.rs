//! # Domain Types
//!
//! Core domain types used throughout the billing counter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Invoice      │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  name           │       │
//! │  │  code (barcode) │   │  number (INV-…) │   │  phone / email  │       │
//! │  │  list price     │   │  lines          │   │  address        │       │
//! │  │  unit price     │   │  totals         │   │  purchase_mode  │       │
//! │  │  stock_qty      │   │  customer       │   └─────────────────┘       │
//! │  └────────┬────────┘   └─────────────────┘                              │
//! │           │ quote()                                                     │
//! │  ┌────────▼────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductQuote   │   │ StockDecrement  │   │ RenderedDocument│       │
//! │  │  what a scan    │   │ {code, delta}   │   │ filename, bytes │       │
//! │  │  needs to bill  │   │ + per-item      │   │ content type    │       │
//! │  └─────────────────┘   │   outcome       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! - `id`: UUID v4, immutable, used for database relations
//! - Business ID: `code` for products, `number` for invoices

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 300 bps = 3% (combined GST on jewellery), split into two 150 bps halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a fraction (`150 bps` → `0.015`).
    ///
    /// Computed as `bps / 10000` so the result is the correctly rounded
    /// double of the decimal rate, identical to writing the literal.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Divisor that strips this rate from a tax-inclusive amount
    /// (`300 bps` → `1.03`).
    #[inline]
    pub fn inclusive_divisor(&self) -> f64 {
        (10_000 + self.0) as f64 / 10_000.0
    }

    /// Half of this rate (the CGST/SGST split).
    #[inline]
    pub const fn half(&self) -> Self {
        TaxRate(self.0 / 2)
    }

    /// Human label, e.g. `1.5%`.
    pub fn label(&self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            format!("{}%", whole)
        } else if frac % 10 == 0 {
            format!("{}.{}%", whole, frac / 10)
        } else {
            format!("{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalogue product as stored in the `products` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Barcode printed on the tag, stored normalized (trimmed, uppercase).
    pub code: String,

    /// Display name shown on the bill.
    pub name: String,

    /// MRP in paise.
    pub list_price_cents: i64,

    /// Selling price in paise; what the customer actually pays.
    pub unit_price_cents: i64,

    /// Units on hand. May go negative: the counter never refuses a sale.
    pub stock_qty: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn list_price(&self) -> Money {
        Money::from_cents(self.list_price_cents)
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// The subset of attributes a scan needs.
    pub fn quote(&self) -> ProductQuote {
        ProductQuote {
            code: self.code.clone(),
            name: self.name.clone(),
            list_price: self.list_price(),
            unit_price: self.unit_price(),
        }
    }
}

/// What a product lookup hands back to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductQuote {
    pub code: String,
    pub name: String,
    pub list_price: Money,
    pub unit_price: Money,
}

// =============================================================================
// Customer
// =============================================================================

/// Sales channel the bill was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum PurchaseMode {
    /// Walk-in customer at the counter.
    #[default]
    Offline,
    Amazon,
    Website,
}

impl PurchaseMode {
    pub const ALL: [PurchaseMode; 3] = [
        PurchaseMode::Offline,
        PurchaseMode::Amazon,
        PurchaseMode::Website,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseMode::Offline => "Offline",
            PurchaseMode::Amazon => "Amazon",
            PurchaseMode::Website => "Website",
        }
    }
}

impl fmt::Display for PurchaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseMode {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "offline" => Ok(PurchaseMode::Offline),
            "amazon" => Ok(PurchaseMode::Amazon),
            "website" => Ok(PurchaseMode::Website),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "purchase_mode".to_string(),
                allowed: Self::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            }),
        }
    }
}

/// Customer details captured at the counter.
///
/// Only `name` is required, and only at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub purchase_mode: PurchaseMode,
}

impl Customer {
    /// Resets the contact fields after a bill is done.
    ///
    /// The purchase mode is a counter setting more than a customer attribute,
    /// so it carries over to the next bill.
    pub fn clear_contact(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.email.clear();
        self.address.clear();
    }

    /// The email address to deliver the invoice to, if one was captured.
    pub fn email_address(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty()).then_some(email)
    }

    /// Copy with surrounding whitespace removed from every text field.
    pub fn trimmed(&self) -> Customer {
        Customer {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            purchase_mode: self.purchase_mode,
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Tax breakdown derived from a cart.
///
/// Always recomputed from line items, never edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    /// Σ unit price × quantity, tax inclusive.
    pub subtotal: Money,
    pub taxable: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub grand_total: Money,
}

/// One billed product on a finished invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLine {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub list_price: Money,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A submitted bill: cart snapshot, customer and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human invoice number, `INV-<epoch millis>`.
    pub number: String,

    pub customer: Customer,

    pub lines: Vec<InvoiceLine>,

    pub totals: InvoiceTotals,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Builds the human invoice number for a moment in time.
    pub fn number_for(at: DateTime<Utc>) -> String {
        format!("INV-{}", at.timestamp_millis())
    }

    /// File name used for the rendered document.
    pub fn document_filename(&self) -> String {
        format!("{}.pdf", self.number)
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Instruction to take `delta` units of `code` off the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockDecrement {
    pub code: String,
    pub delta: i64,
}

/// What happened to a single stock decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "result", rename_all = "snake_case")]
#[ts(export)]
pub enum StockUpdateStatus {
    /// Stock was reduced; `remaining` is the new level.
    Applied { remaining: i64 },
    /// No product with this code exists any more.
    Missing,
    /// The update could not be written.
    Failed { message: String },
}

/// Per-item result of a best-effort stock batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockUpdateOutcome {
    pub code: String,
    pub delta: i64,
    pub status: StockUpdateStatus,
}

impl StockUpdateOutcome {
    pub fn applied(request: &StockDecrement, remaining: i64) -> Self {
        Self::with_status(request, StockUpdateStatus::Applied { remaining })
    }

    pub fn missing(request: &StockDecrement) -> Self {
        Self::with_status(request, StockUpdateStatus::Missing)
    }

    pub fn failed(request: &StockDecrement, message: impl Into<String>) -> Self {
        Self::with_status(
            request,
            StockUpdateStatus::Failed {
                message: message.into(),
            },
        )
    }

    fn with_status(request: &StockDecrement, status: StockUpdateStatus) -> Self {
        StockUpdateOutcome {
            code: request.code.clone(),
            delta: request.delta,
            status,
        }
    }

    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self.status, StockUpdateStatus::Applied { .. })
    }
}

// =============================================================================
// Rendered Document
// =============================================================================

/// A binary artifact produced by the document renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderedDocument {
    pub filename: String,
    pub content_type: String,
    pub size_bytes: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn pdf(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        RenderedDocument {
            filename: filename.into(),
            content_type: "application/pdf".to_string(),
            size_bytes: bytes.len(),
            bytes,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_fraction_and_divisor() {
        let gst = TaxRate::from_bps(300);
        assert_eq!(gst.fraction(), 0.03);
        assert_eq!(gst.inclusive_divisor(), 1.03);
        assert_eq!(gst.half().fraction(), 0.015);
    }

    #[test]
    fn test_tax_rate_label() {
        assert_eq!(TaxRate::from_bps(150).label(), "1.5%");
        assert_eq!(TaxRate::from_bps(300).label(), "3%");
        assert_eq!(TaxRate::from_bps(825).label(), "8.25%");
    }

    #[test]
    fn test_purchase_mode_parsing() {
        assert_eq!("offline".parse::<PurchaseMode>().unwrap(), PurchaseMode::Offline);
        assert_eq!(" Amazon ".parse::<PurchaseMode>().unwrap(), PurchaseMode::Amazon);
        assert_eq!("WEBSITE".parse::<PurchaseMode>().unwrap(), PurchaseMode::Website);
        assert!("store".parse::<PurchaseMode>().is_err());
        assert_eq!(PurchaseMode::default(), PurchaseMode::Offline);
    }

    #[test]
    fn test_purchase_mode_serializes_as_label() {
        let json = serde_json::to_string(&PurchaseMode::Amazon).unwrap();
        assert_eq!(json, "\"Amazon\"");
    }

    #[test]
    fn test_customer_clear_keeps_mode() {
        let mut customer = Customer {
            name: "Asha".into(),
            phone: "98765".into(),
            email: "asha@example.com".into(),
            address: "Jamshedpur".into(),
            purchase_mode: PurchaseMode::Website,
        };
        customer.clear_contact();
        assert!(customer.name.is_empty());
        assert!(customer.email_address().is_none());
        assert_eq!(customer.purchase_mode, PurchaseMode::Website);
    }

    #[test]
    fn test_customer_deserializes_partial() {
        let customer: Customer = serde_json::from_str(r#"{"name":"Ravi"}"#).unwrap();
        assert_eq!(customer.name, "Ravi");
        assert_eq!(customer.purchase_mode, PurchaseMode::Offline);
    }

    #[test]
    fn test_invoice_number_format() {
        let at = DateTime::from_timestamp_millis(1_718_000_000_123).unwrap();
        assert_eq!(Invoice::number_for(at), "INV-1718000000123");
    }

    #[test]
    fn test_stock_outcome_serialization() {
        let request = StockDecrement {
            code: "ZC-1001".into(),
            delta: 2,
        };
        let json = serde_json::to_value(StockUpdateOutcome::applied(&request, 3)).unwrap();
        assert_eq!(json["status"]["result"], "applied");
        assert_eq!(json["status"]["remaining"], 3);
        assert_eq!(json["code"], "ZC-1001");

        let missing = StockUpdateOutcome::missing(&request);
        assert!(!missing.is_applied());
    }
}
