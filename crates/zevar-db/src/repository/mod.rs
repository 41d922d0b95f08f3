//! # Repository Module
//!
//! Database repository implementations for the billing counter.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler / billing session                                        │
//! │       │                                                                 │
//! │       │  db.products().get_by_code("ZC-1001")                          │
//! │       ▼                                                                 │
//! │  ProductRepository                 InvoiceRepository                   │
//! │  ├── get_by_code / get_by_id       ├── insert (transaction)            │
//! │  ├── list / count                  ├── get_by_id                       │
//! │  ├── insert                        └── list_recent                     │
//! │  └── update_stock                                                      │
//! │       │                                                                 │
//! │       ▼  SQL                                                            │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Catalogue lookups and stock
//! - [`InvoiceRepository`] - Submitted bills and their lines

pub mod invoice;
pub mod product;

pub use invoice::{InvoiceRepository, InvoiceSummary};
pub use product::{NewProduct, ProductRepository};
