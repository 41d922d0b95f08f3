//! # zevar-core: Billing Logic for the Zevar Counter
//!
//! The cart, the GST calculator and the billing session, with zero I/O.
//! Databases, PDF engines and mail relays are reached only through the
//! collaborator traits in [`session`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Zevar Billing Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser UI                                   │   │
//! │  │    Scan box ──► Cart table ──► Customer form ──► Submit         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    billing-api (axum)                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ zevar-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │  session  │  │ validation│  │   │
//! │  │   │  paise    │  │  merge by │  │ scan      │  │   rules   │  │   │
//! │  │   │  en-IN    │  │  code,GST │  │ submit    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────┼───────────────────────┘   │
//! │                       collaborator traits  │                            │
//! │            ┌───────────────────────────────┼──────────────┐             │
//! │  ┌─────────▼─────────┐            ┌────────▼─────────────┐│             │
//! │  │  zevar-db         │            │  zevar-services      ││             │
//! │  │  catalogue, bills │            │  PDF, SMTP, Drive    ││             │
//! │  └───────────────────┘            └──────────────────────┘│             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice, Customer, stock outcomes)
//! - [`money`] - Paise-backed Money, amount parsing, Indian formatting
//! - [`cart`] - Cart, line items, GST totals
//! - [`session`] - Billing session and collaborator traits
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use zevar_core::cart::Cart;
//! use zevar_core::money::Money;
//! use zevar_core::types::ProductQuote;
//!
//! let mut cart = Cart::new();
//! let necklace = ProductQuote {
//!     code: "zc-1001".into(),
//!     name: "Kundan Necklace".into(),
//!     list_price: Money::from_rupees(1200),
//!     unit_price: Money::from_rupees(1000),
//! };
//! cart.add_quote(necklace.clone()).unwrap();
//! cart.add_quote(necklace).unwrap();
//!
//! let totals = cart.totals();
//! assert_eq!(totals.grand_total.to_string(), "₹2,000.01");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{compute_totals, normalize_code, Cart, LineItem, GST_RATE};
pub use error::{CollaboratorError, CoreError, CoreResult, ValidationError};
pub use money::{parse_amount, Money};
pub use session::{
    BillingSession, Collaborators, InvoiceArchive, InvoiceDelivery, InvoiceRenderer,
    InvoiceStore, ProductLookup, SessionView, SubmissionReport, SubmissionWarning,
};
pub use types::*;
