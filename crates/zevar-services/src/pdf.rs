//! # HTML to PDF
//!
//! Prints HTML to an A4 PDF by driving a headless Chromium process.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  html ──► add print style ──► temp dir/page.html                       │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │  chromium --headless --print-to-pdf=<temp dir>/out.pdf file://…        │
//! │                                   │   (killed after timeout)            │
//! │                                   ▼                                     │
//! │                          read out.pdf ──► bytes                         │
//! │                                                                         │
//! │  The temp dir is removed when the call returns, success or not.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use zevar_core::{CollaboratorError, Invoice, InvoiceRenderer, RenderedDocument};

use crate::config::{PdfConfig, StoreProfile};
use crate::error::{ServiceError, ServiceResult};
use crate::invoice_html::render_invoice_html;

/// A4 page with backgrounds, matching what the counter printer expects.
const PRINT_STYLE: &str = "<style>@page { size: A4; margin: 0; } \
html { -webkit-print-color-adjust: exact; print-color-adjust: exact; }</style>";

/// Converts an HTML document to PDF bytes.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    async fn html_to_pdf(&self, html: &str) -> ServiceResult<Vec<u8>>;
}

/// Puts the print style inside `<head>` when there is one.
pub fn with_print_style(html: &str) -> String {
    match html.find("<head>") {
        Some(pos) => {
            let split = pos + "<head>".len();
            format!("{}{}{}", &html[..split], PRINT_STYLE, &html[split..])
        }
        None => format!("{}{}", PRINT_STYLE, html),
    }
}

// =============================================================================
// Chromium
// =============================================================================

/// [`PdfEngine`] backed by a headless Chromium binary.
#[derive(Debug, Clone)]
pub struct ChromiumPdfEngine {
    binary: PathBuf,
    timeout: Duration,
}

impl ChromiumPdfEngine {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        ChromiumPdfEngine {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new(config.chromium_path.clone(), config.timeout())
    }
}

#[async_trait]
impl PdfEngine for ChromiumPdfEngine {
    #[instrument(skip(self, html), fields(html_len = html.len()))]
    async fn html_to_pdf(&self, html: &str) -> ServiceResult<Vec<u8>> {
        let workdir = tempfile::tempdir()?;
        let page = workdir.path().join("page.html");
        let output = workdir.path().join("out.pdf");

        tokio::fs::write(&page, with_print_style(html)).await?;

        let mut command = Command::new(&self.binary);
        command
            .arg("--headless")
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", page.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(binary = %self.binary.display(), "Launching PDF engine");

        let child = command.spawn().map_err(|e| {
            ServiceError::PdfEngine(format!("cannot start {}: {}", self.binary.display(), e))
        })?;

        let finished = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                warn!(timeout_ms = self.timeout.as_millis(), "PDF engine timed out");
                ServiceError::PdfTimeout(self.timeout.as_millis())
            })??;

        if !finished.status.success() {
            let stderr = String::from_utf8_lossy(&finished.stderr);
            return Err(ServiceError::PdfEngine(format!(
                "exited with {}: {}",
                finished.status,
                stderr.trim()
            )));
        }

        let bytes = tokio::fs::read(&output)
            .await
            .map_err(|e| ServiceError::PdfEngine(format!("no PDF written: {}", e)))?;
        if bytes.is_empty() {
            return Err(ServiceError::PdfEngine("empty PDF written".to_string()));
        }

        debug!(size = bytes.len(), "PDF generated");
        Ok(bytes)
    }
}

// =============================================================================
// Invoice Renderer
// =============================================================================

/// Renders invoices as PDF through any [`PdfEngine`].
#[derive(Clone)]
pub struct PdfInvoiceRenderer {
    engine: Arc<dyn PdfEngine>,
    store: StoreProfile,
}

impl PdfInvoiceRenderer {
    pub fn new(engine: Arc<dyn PdfEngine>, store: StoreProfile) -> Self {
        PdfInvoiceRenderer { engine, store }
    }
}

#[async_trait]
impl InvoiceRenderer for PdfInvoiceRenderer {
    async fn render(&self, invoice: &Invoice) -> Result<RenderedDocument, CollaboratorError> {
        let html = render_invoice_html(invoice, &self.store)?;
        let bytes = self.engine.html_to_pdf(&html).await?;

        info!(number = %invoice.number, size = bytes.len(), "Invoice rendered");
        Ok(RenderedDocument::pdf(invoice.document_filename(), bytes))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use zevar_core::{Customer, InvoiceTotals};

    struct RecordingEngine {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl PdfEngine for RecordingEngine {
        async fn html_to_pdf(&self, html: &str) -> ServiceResult<Vec<u8>> {
            self.seen.lock().unwrap().push(html.to_string());
            if self.fail {
                return Err(ServiceError::PdfEngine("boom".into()));
            }
            Ok(b"%PDF-1.4 test".to_vec())
        }
    }

    fn invoice() -> Invoice {
        Invoice {
            id: "id".into(),
            number: "INV-42".into(),
            customer: Customer {
                name: "Ravi".into(),
                ..Customer::default()
            },
            lines: vec![],
            totals: InvoiceTotals::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_print_style_goes_into_head() {
        let html = with_print_style("<html><head><title>x</title></head></html>");
        assert!(html.starts_with("<html><head><style>@page { size: A4;"));
        assert!(html.contains("</style><title>x</title>"));

        let bare = with_print_style("<p>hi</p>");
        assert!(bare.starts_with("<style>"));
        assert!(bare.ends_with("<p>hi</p>"));
    }

    #[tokio::test]
    async fn test_renderer_names_document_after_invoice() {
        let engine = Arc::new(RecordingEngine {
            seen: Mutex::new(Vec::new()),
            fail: false,
        });
        let renderer = PdfInvoiceRenderer::new(engine.clone(), StoreProfile::default());

        let doc = renderer.render(&invoice()).await.unwrap();
        assert_eq!(doc.filename, "INV-42.pdf");
        assert_eq!(doc.content_type, "application/pdf");
        assert_eq!(doc.size_bytes, doc.bytes.len());

        let seen = engine.seen.lock().unwrap();
        assert!(seen[0].contains("Invoice #: INV-42"));
    }

    #[tokio::test]
    async fn test_renderer_surfaces_engine_error() {
        let engine = Arc::new(RecordingEngine {
            seen: Mutex::new(Vec::new()),
            fail: true,
        });
        let renderer = PdfInvoiceRenderer::new(engine, StoreProfile::default());

        let err = renderer.render(&invoice()).await.unwrap_err();
        assert_eq!(err.message(), "PDF engine failed: boom");
    }

    #[tokio::test]
    async fn test_missing_binary_is_engine_error() {
        let engine = ChromiumPdfEngine::new("/nonexistent/chromium-zevar", Duration::from_secs(1));
        let err = engine.html_to_pdf("<p>x</p>").await.unwrap_err();
        assert!(matches!(err, ServiceError::PdfEngine(_)));
    }

    #[cfg(unix)]
    fn script(dir: &std::path::Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-chromium");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fake_chromium_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let binary = script(
            dir.path(),
            r#"for arg in "$@"; do
  case "$arg" in
    --print-to-pdf=*) printf '%%PDF-1.4 fake' > "${arg#--print-to-pdf=}" ;;
  esac
done"#,
        );

        let engine = ChromiumPdfEngine::new(binary, Duration::from_secs(5));
        let bytes = engine.html_to_pdf("<p>x</p>").await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_and_timeout() {
        let dir = tempfile::tempdir().unwrap();

        let failing = script(dir.path(), "echo 'no display' >&2; exit 3");
        let err = ChromiumPdfEngine::new(failing, Duration::from_secs(5))
            .html_to_pdf("<p>x</p>")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no display"));

        let slow_dir = tempfile::tempdir().unwrap();
        let slow = script(slow_dir.path(), "sleep 5");
        let err = ChromiumPdfEngine::new(slow, Duration::from_millis(200))
            .html_to_pdf("<p>x</p>")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::PdfTimeout(200)));
    }
}
