//! Read-only product and invoice lookups.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use zevar_core::{normalize_code, Invoice, Product};
use zevar_db::InvoiceSummary;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

impl ListParams {
    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list(params.limit()).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Product>> {
    state
        .db
        .products()
        .get_by_code(&code)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", &normalize_code(&code)))
}

pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<InvoiceSummary>>> {
    Ok(Json(state.db.invoices().list_recent(params.limit()).await?))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Invoice>> {
    state
        .db
        .invoices()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Invoice", &id))
}
