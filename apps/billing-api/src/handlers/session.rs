//! Billing session endpoints: the cart and customer of the counter.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};

use zevar_core::{Customer, LineItem, SessionView, SubmissionReport};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub code: String,
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.lock().await.view())
}

/// Adds one unit of the scanned product to the cart.
pub async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> ApiResult<Json<LineItem>> {
    let mut session = state.session.lock().await;
    let line = session.scan(&request.code, &state.db).await?;
    Ok(Json(line))
}

pub async fn set_customer(
    State(state): State<AppState>,
    Json(customer): Json<Customer>,
) -> ApiResult<Json<SessionView>> {
    let mut session = state.session.lock().await;
    session.set_customer(customer)?;
    Ok(Json(session.view()))
}

pub async fn abandon_cart(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.abandon_cart();
    Json(session.view())
}

/// Turns the cart into an invoice. Warnings do not fail the request.
pub async fn submit(State(state): State<AppState>) -> ApiResult<Json<SubmissionReport>> {
    let mut session = state.session.lock().await;
    let report = session.submit(state.collaborators()).await?;

    if report.is_clean() {
        info!(number = %report.invoice.number, "Bill completed");
    } else {
        warn!(
            number = %report.invoice.number,
            warnings = report.warnings.len(),
            "Bill completed with warnings"
        );
    }

    Ok(Json(report))
}
