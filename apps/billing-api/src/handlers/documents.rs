//! Standalone document endpoints used by the browser UI.
//!
//! These keep their own response shapes (`{"success": ..}` and
//! `{"error": ..}`) rather than the API error envelope, because existing
//! front-end code reads them directly. Bodies are read as JSON whatever the
//! `Content-Type`; an unreadable body counts as an empty one.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use tracing::{debug, error, info};

use zevar_services::OutgoingEmail;

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendEmailRequest {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub html: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneratePdfRequest {
    pub html: Option<String>,
    pub filename: Option<String>,
}

impl GeneratePdfRequest {
    fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
    }
}

const DEFAULT_FILENAME: &str = "invoice.pdf";

fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!(error = %e, "Unreadable request body");
        T::default()
    })
}

pub async fn send_email(State(state): State<AppState>, body: Bytes) -> Response {
    let request: SendEmailRequest = parse_body(&body);

    let Some(mailer) = state.mailer.as_ref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "SMTP is not configured" })),
        )
            .into_response();
    };

    let email = OutgoingEmail {
        to: request.to.unwrap_or_default(),
        subject: request.subject.unwrap_or_default(),
        html: request.html.unwrap_or_default(),
        attachments: Vec::new(),
    };

    match mailer.send(&email).await {
        Ok(()) => {
            info!(to = %email.to, "Email sent");
            Json(json!({ "success": true })).into_response()
        }
        Err(e) => {
            error!(to = %email.to, error = %e, "Email failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// `Content-Disposition` value; quotes and control characters are dropped
/// from the filename so the header stays valid.
fn attachment_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .collect();
    let safe = if safe.trim().is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        safe
    };
    format!("attachment; filename=\"{}\"", safe)
}

pub async fn generate_pdf(State(state): State<AppState>, body: Bytes) -> Response {
    let request: GeneratePdfRequest = parse_body(&body);
    let html = match request.html.as_deref() {
        Some(html) if !html.is_empty() => html,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing HTML content" })),
            )
                .into_response()
        }
    };

    match state.pdf.html_to_pdf(html).await {
        Ok(bytes) => {
            info!(filename = %request.filename(), size = bytes.len(), "PDF generated");
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        attachment_disposition(request.filename()),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "PDF generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "PDF generation failed" })),
            )
                .into_response()
        }
    }
}
