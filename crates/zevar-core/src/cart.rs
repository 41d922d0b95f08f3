//! # Cart & Invoice Calculator
//!
//! The in-memory cart of one billing session and the tax computation that
//! turns it into invoice totals.
//!
//! ## Scan Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw token "  zc-1001 "                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize_code() ──► "ZC-1001"                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lookup (collaborator) ──► ProductQuote                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::add_quote()                                                      │
//! │       ├── line with code exists? ──► quantity += 1                      │
//! │       └── otherwise             ──► push { quantity: 1 }                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals
//! Prices on the counter are GST inclusive. [`compute_totals`] backs the
//! 3% out of the subtotal and splits it into CGST and SGST, rounding half
//! away from zero to two decimals after every step. Rounding each step on
//! its own means `grand_total` can differ from `subtotal` by a paisa; that
//! is the expected result, not an error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{InvoiceLine, InvoiceTotals, ProductQuote, TaxRate};

/// Combined GST on jewellery (CGST + SGST).
pub const GST_RATE: TaxRate = TaxRate::from_bps(300);

// =============================================================================
// Code Normalization
// =============================================================================

/// Canonical form of a scanned token: trimmed and uppercased.
///
/// ## Example
/// ```rust
/// use zevar_core::cart::normalize_code;
///
/// assert_eq!(normalize_code("  zc-1001\n"), "ZC-1001");
/// ```
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product in the cart with its aggregated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Normalized product code; unique within a cart.
    pub code: String,
    pub name: String,
    /// MRP, shown for reference only.
    pub list_price: Money,
    /// What the customer pays per unit, GST inclusive.
    pub unit_price: Money,
    pub quantity: i64,
}

impl LineItem {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Frozen copy for an invoice.
    pub fn to_invoice_line(&self) -> InvoiceLine {
        InvoiceLine {
            code: self.code.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            list_price: self.list_price,
            unit_price: self.unit_price,
            line_total: self.line_total(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The transient cart owned by a billing session.
///
/// ## Invariants
/// - At most one line per normalized code
/// - Every quantity is ≥ 1
/// - Lines keep their first-scan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of a looked-up product.
    ///
    /// ## Behavior
    /// - Rejects quotes without a name or code (cart unchanged)
    /// - Existing code: quantity goes up by exactly one
    /// - New code: appended with quantity 1
    ///
    /// ## Returns
    /// The line the scan landed on.
    pub fn add_quote(&mut self, quote: ProductQuote) -> Result<&LineItem, CoreError> {
        let code = normalize_code(&quote.code);
        if code.is_empty() {
            return Err(CoreError::InvalidProduct {
                code: quote.code,
                reason: "missing product code".to_string(),
            });
        }

        let name = quote.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidProduct {
                code,
                reason: "missing product name".to_string(),
            });
        }

        let index = match self.items.iter().position(|item| item.code == code) {
            Some(index) => {
                self.items[index].quantity += 1;
                index
            }
            None => {
                self.items.push(LineItem {
                    code,
                    name: name.to_string(),
                    list_price: quote.list_price,
                    unit_price: quote.unit_price,
                    quantity: 1,
                });
                self.items.len() - 1
            }
        };

        Ok(&self.items[index])
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, code: &str) -> Option<&LineItem> {
        let code = normalize_code(code);
        self.items.iter().find(|item| item.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Totals for the current contents. Does not modify the cart.
    pub fn totals(&self) -> InvoiceTotals {
        compute_totals(&self.items)
    }

    /// Frozen invoice lines in cart order.
    pub fn snapshot(&self) -> Vec<InvoiceLine> {
        self.items.iter().map(LineItem::to_invoice_line).collect()
    }
}

// =============================================================================
// Total Computation
// =============================================================================

/// Rounds a rupee amount to two decimals, half away from zero.
///
/// The decision is made on the exact binary value of `amount`, not on
/// `amount * 100`: `1.00 * 0.015` is stored just below `0.015` and rounds
/// to `0.01`.
pub fn round2(amount: f64) -> f64 {
    Decimal::from_f64_retain(amount)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(amount)
}

/// Derives the GST breakdown from line items.
///
/// ## Algorithm
/// ```text
/// subtotal = Σ unit_price × quantity            (f64, no rounding)
/// taxable  = round2(subtotal / 1.03)
/// cgst     = round2(taxable × 0.015)
/// sgst     = round2(taxable × 0.015)
/// grand    = round2(taxable + cgst + sgst)
/// ```
///
/// Each rounded value is carried into the next step as-is; nothing is
/// re-derived from the final figure.
///
/// ## Example
/// ```rust
/// use zevar_core::cart::{compute_totals, LineItem};
/// use zevar_core::money::Money;
///
/// let items = vec![LineItem {
///     code: "ZC-1001".into(),
///     name: "Kundan Necklace".into(),
///     list_price: Money::from_rupees(1200),
///     unit_price: Money::from_rupees(1000),
///     quantity: 2,
/// }];
///
/// let totals = compute_totals(&items);
/// assert_eq!(totals.taxable.cents(), 194_175);
/// assert_eq!(totals.cgst.cents(), 2_913);
/// assert_eq!(totals.sgst.cents(), 2_913);
/// assert_eq!(totals.grand_total.cents(), 200_001);
/// ```
pub fn compute_totals(items: &[LineItem]) -> InvoiceTotals {
    let subtotal = items.iter().fold(0.0_f64, |sum, item| {
        sum + item.unit_price.to_major() * item.quantity as f64
    });

    let half = GST_RATE.half();
    let taxable = round2(subtotal / GST_RATE.inclusive_divisor());
    let cgst = round2(taxable * half.fraction());
    let sgst = round2(taxable * half.fraction());
    let grand_total = round2(taxable + cgst + sgst);

    InvoiceTotals {
        subtotal: Money::from_major_rounded(subtotal),
        taxable: Money::from_major_rounded(taxable),
        cgst: Money::from_major_rounded(cgst),
        sgst: Money::from_major_rounded(sgst),
        grand_total: Money::from_major_rounded(grand_total),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
