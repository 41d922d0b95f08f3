//! # Invoice Repository
//!
//! Persistence for submitted bills.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert(&Invoice)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │    INSERT invoices       (customer + totals)                           │
//! │    INSERT invoice_items  (one row per line, position = line order)     │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure rolls the whole invoice back: a bill is either stored    │
//! │  with all of its lines or not at all.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use zevar_core::{Customer, Invoice, InvoiceLine, InvoiceTotals, Money, PurchaseMode};

use crate::error::{DbError, DbResult};

/// One row of the recent-invoices list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub id: String,
    pub number: String,
    pub customer_name: String,
    pub purchase_mode: PurchaseMode,
    pub grand_total: Money,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: String,
    number: String,
    customer_name: String,
    customer_phone: String,
    customer_email: String,
    customer_address: String,
    purchase_mode: String,
    subtotal_cents: i64,
    taxable_cents: i64,
    cgst_cents: i64,
    sgst_cents: i64,
    grand_total_cents: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceItemRow {
    code: String,
    name: String,
    quantity: i64,
    list_price_cents: i64,
    unit_price_cents: i64,
    line_total_cents: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: String,
    number: String,
    customer_name: String,
    purchase_mode: String,
    grand_total_cents: i64,
    item_count: i64,
    created_at: DateTime<Utc>,
}

fn parse_mode(raw: &str) -> DbResult<PurchaseMode> {
    raw.parse()
        .map_err(|_| DbError::corrupt("invoices", format!("unknown purchase_mode '{raw}'")))
}

impl InvoiceRow {
    fn into_invoice(self, items: Vec<InvoiceItemRow>) -> DbResult<Invoice> {
        let purchase_mode = parse_mode(&self.purchase_mode)?;

        Ok(Invoice {
            id: self.id,
            number: self.number,
            customer: Customer {
                name: self.customer_name,
                phone: self.customer_phone,
                email: self.customer_email,
                address: self.customer_address,
                purchase_mode,
            },
            lines: items
                .into_iter()
                .map(|row| InvoiceLine {
                    code: row.code,
                    name: row.name,
                    quantity: row.quantity,
                    list_price: Money::from_cents(row.list_price_cents),
                    unit_price: Money::from_cents(row.unit_price_cents),
                    line_total: Money::from_cents(row.line_total_cents),
                })
                .collect(),
            totals: InvoiceTotals {
                subtotal: Money::from_cents(self.subtotal_cents),
                taxable: Money::from_cents(self.taxable_cents),
                cgst: Money::from_cents(self.cgst_cents),
                sgst: Money::from_cents(self.sgst_cents),
                grand_total: Money::from_cents(self.grand_total_cents),
            },
            created_at: self.created_at,
        })
    }
}

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Stores an invoice and all of its lines atomically.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - An invoice with this id already exists
    /// * `DbError::CheckViolation` - A line has a non-positive quantity
    pub async fn insert(&self, invoice: &Invoice) -> DbResult<()> {
        debug!(
            id = %invoice.id,
            number = %invoice.number,
            lines = invoice.lines.len(),
            "Inserting invoice"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, number,
                customer_name, customer_phone, customer_email, customer_address,
                purchase_mode,
                subtotal_cents, taxable_cents, cgst_cents, sgst_cents, grand_total_cents,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.number)
        .bind(&invoice.customer.name)
        .bind(&invoice.customer.phone)
        .bind(&invoice.customer.email)
        .bind(&invoice.customer.address)
        .bind(invoice.customer.purchase_mode)
        .bind(invoice.totals.subtotal.cents())
        .bind(invoice.totals.taxable.cents())
        .bind(invoice.totals.cgst.cents())
        .bind(invoice.totals.sgst.cents())
        .bind(invoice.totals.grand_total.cents())
        .bind(invoice.created_at)
        .execute(&mut *tx)
        .await?;

        for (position, line) in invoice.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, position, code, name, quantity,
                    list_price_cents, unit_price_cents, line_total_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&invoice.id)
            .bind(position as i64)
            .bind(&line.code)
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.list_price.cents())
            .bind(line.unit_price.cents())
            .bind(line.line_total.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            number = %invoice.number,
            grand_total = %invoice.totals.grand_total,
            "Invoice stored"
        );
        Ok(())
    }

    /// Loads an invoice with its lines in billing order.
    ///
    /// ## Returns
    /// * `Ok(Some(Invoice))` - Invoice found
    /// * `Ok(None)` - No invoice with this id
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let Some(row) = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT
                id, number,
                customer_name, customer_phone, customer_email, customer_address,
                purchase_mode,
                subtotal_cents, taxable_cents, cgst_cents, sgst_cents, grand_total_cents,
                created_at
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, InvoiceItemRow>(
            r#"
            SELECT code, name, quantity, list_price_cents, unit_price_cents, line_total_cents
            FROM invoice_items
            WHERE invoice_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        row.into_invoice(items).map(Some)
    }

    /// Lists the most recent invoices, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<InvoiceSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                i.id, i.number, i.customer_name, i.purchase_mode, i.grand_total_cents,
                COALESCE((SELECT SUM(quantity) FROM invoice_items WHERE invoice_id = i.id), 0)
                    AS item_count,
                i.created_at
            FROM invoices i
            ORDER BY i.created_at DESC, i.number DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(InvoiceSummary {
                    purchase_mode: parse_mode(&row.purchase_mode)?,
                    id: row.id,
                    number: row.number,
                    customer_name: row.customer_name,
                    grand_total: Money::from_cents(row.grand_total_cents),
                    item_count: row.item_count,
                    created_at: row.created_at,
                })
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
