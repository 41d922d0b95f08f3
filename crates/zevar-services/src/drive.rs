//! # Google Drive Archive
//!
//! Uploads each rendered invoice to Drive with a single multipart request:
//!
//! ```text
//! POST {api_base}/upload/drive/v3/files?uploadType=multipart
//! Authorization: Bearer <token>
//! Content-Type: multipart/related; boundary=<b>
//!
//! --<b>
//! Content-Type: application/json; charset=UTF-8
//!
//! {"name": "INV-….pdf", "mimeType": "application/pdf", "parents": ["<folder>"]}
//! --<b>
//! Content-Type: application/pdf
//!
//! <pdf bytes>
//! --<b>--
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

use zevar_core::{CollaboratorError, InvoiceArchive, RenderedDocument};

use crate::config::DriveConfig;
use crate::error::{ServiceError, ServiceResult};

const BOUNDARY: &str = "zevar-invoice-boundary";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parents: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

/// [`InvoiceArchive`] that stores PDFs in a Google Drive folder.
#[derive(Clone)]
pub struct DriveArchive {
    client: reqwest::Client,
    api_base: String,
    access_token: String,
    folder_id: Option<String>,
}

impl std::fmt::Debug for DriveArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveArchive")
            .field("api_base", &self.api_base)
            .field("folder_id", &self.folder_id)
            .finish_non_exhaustive()
    }
}

impl DriveArchive {
    pub fn new(config: &DriveConfig) -> ServiceResult<Self> {
        if config.access_token.trim().is_empty() {
            return Err(ServiceError::NotConfigured("Google Drive"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(DriveArchive {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            folder_id: config.folder_id.clone().filter(|id| !id.trim().is_empty()),
        })
    }

    fn multipart_body(&self, document: &RenderedDocument) -> ServiceResult<Vec<u8>> {
        let metadata = serde_json::to_string(&FileMetadata {
            name: &document.filename,
            mime_type: &document.content_type,
            parents: self.folder_id.iter().map(String::as_str).collect(),
        })
        .map_err(|e| ServiceError::MessageBuild(e.to_string()))?;

        let mut body = Vec::with_capacity(document.bytes.len() + metadata.len() + 256);
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n\
                 --{BOUNDARY}\r\nContent-Type: {}\r\n\r\n",
                document.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&document.bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        Ok(body)
    }

    /// Uploads a document and returns the Drive file id.
    #[instrument(skip(self, document), fields(file = %document.filename))]
    pub async fn upload(&self, document: &RenderedDocument) -> ServiceResult<String> {
        let url = format!("{}/upload/drive/v3/files", self.api_base);
        let body = self.multipart_body(document)?;

        debug!(size = body.len(), "Uploading to Drive");

        let response = self
            .client
            .post(&url)
            .query(&[("uploadType", "multipart")])
            .bearer_auth(&self.access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={BOUNDARY}"),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::DriveRejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedFile = response.json().await?;
        info!(file_id = %created.id, "Invoice archived to Drive");
        Ok(created.id)
    }
}

#[async_trait]
impl InvoiceArchive for DriveArchive {
    async fn archive(&self, document: &RenderedDocument) -> Result<String, CollaboratorError> {
        Ok(self.upload(document).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer, folder: Option<&str>) -> DriveConfig {
        DriveConfig {
            enabled: true,
            api_base: format!("{}/", server.uri()),
            access_token: "test-token".into(),
            folder_id: folder.map(str::to_string),
        }
    }

    fn document() -> RenderedDocument {
        RenderedDocument::pdf("INV-1718000000123.pdf", b"%PDF-1.4 body".to_vec())
    }

    #[tokio::test]
    async fn test_upload_returns_file_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload/drive/v3/files"))
            .and(query_param("uploadType", "multipart"))
            .and(header("authorization", "Bearer test-token"))
            .and(header(
                "content-type",
                "multipart/related; boundary=zevar-invoice-boundary",
            ))
            .and(body_string_contains(r#""name":"INV-1718000000123.pdf""#))
            .and(body_string_contains(r#""parents":["folder-9"]"#))
            .and(body_string_contains("%PDF-1.4 body"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "file-123"})))
            .expect(1)
            .mount(&server)
            .await;

        let archive = DriveArchive::new(&config(&server, Some("folder-9"))).unwrap();
        let id = archive.archive(&document()).await.unwrap();
        assert_eq!(id, "file-123");
    }

    #[tokio::test]
    async fn test_rejection_becomes_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
            .mount(&server)
            .await;

        let archive = DriveArchive::new(&config(&server, None)).unwrap();
        let err = archive.upload(&document()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::DriveRejected { status: 401, ref body } if body == "invalid credentials"
        ));
    }

    #[test]
    fn test_metadata_without_folder() {
        let archive = DriveArchive {
            client: reqwest::Client::new(),
            api_base: "http://localhost".into(),
            access_token: "t".into(),
            folder_id: None,
        };
        let body = String::from_utf8(archive.multipart_body(&document()).unwrap()).unwrap();
        assert!(body.contains(r#"{"name":"INV-1718000000123.pdf","mimeType":"application/pdf"}"#));
        assert!(body.ends_with("\r\n--zevar-invoice-boundary--\r\n"));
    }

    #[test]
    fn test_requires_token() {
        let err = DriveArchive::new(&DriveConfig::default()).unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured(_)));
    }
}
