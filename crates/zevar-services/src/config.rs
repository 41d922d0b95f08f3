//! # Service Configuration
//!
//! Settings for the store profile and the outbound integrations. The
//! billing-api binary embeds these as sections of its TOML file:
//!
//! ```toml
//! [store]
//! name = "Zevar Club"
//! gstin = "20AADFZ7236L1ZZ"
//!
//! [smtp]
//! host = "smtp.gmail.com"
//! port = 587
//! username = "counter@zevarclub.in"
//! password = "app-password"
//!
//! [pdf]
//! chromium_path = "chromium"
//! timeout_secs = 30
//!
//! [drive]
//! enabled = true
//! access_token = "ya29...."
//! folder_id = "1AbC..."
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Store Profile
// =============================================================================

/// The shop details printed on every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_city")]
    pub city: String,

    #[serde(default = "default_gstin")]
    pub gstin: String,

    #[serde(default = "default_phones")]
    pub phones: Vec<String>,

    #[serde(default = "default_website")]
    pub website: String,
}

fn default_store_name() -> String {
    "Zevar Club".to_string()
}

fn default_address() -> String {
    "Plot 337, Near Rishi Bhawan, Ramtekri Road, Jugsalai".to_string()
}

fn default_city() -> String {
    "Jamshedpur - 831006".to_string()
}

fn default_gstin() -> String {
    "20AADFZ7236L1ZZ".to_string()
}

fn default_phones() -> Vec<String> {
    vec!["+91-9470128088".to_string(), "+91-7304136011".to_string()]
}

fn default_website() -> String {
    "www.zevarclub.in".to_string()
}

impl Default for StoreProfile {
    fn default() -> Self {
        StoreProfile {
            name: default_store_name(),
            address: default_address(),
            city: default_city(),
            gstin: default_gstin(),
            phones: default_phones(),
            website: default_website(),
        }
    }
}

// =============================================================================
// SMTP
// =============================================================================

/// SMTP relay used for `/send-email` and invoice delivery.
///
/// Mail is only sent when both `username` and `password` are set.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    /// STARTTLS submission port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Login, also used as the sender address.
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_timeout() -> u64 {
    10
}

impl SmtpConfig {
    pub fn is_configured(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        SmtpConfig {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            timeout_secs: default_smtp_timeout(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// =============================================================================
// PDF
// =============================================================================

/// Headless Chromium used to print HTML to PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Binary name on `PATH` or an absolute path.
    #[serde(default = "default_chromium_path")]
    pub chromium_path: PathBuf,

    #[serde(default = "default_pdf_timeout")]
    pub timeout_secs: u64,
}

fn default_chromium_path() -> PathBuf {
    PathBuf::from("chromium")
}

fn default_pdf_timeout() -> u64 {
    30
}

impl PdfConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        PdfConfig {
            chromium_path: default_chromium_path(),
            timeout_secs: default_pdf_timeout(),
        }
    }
}

// =============================================================================
// Google Drive
// =============================================================================

/// Off-site archive of rendered invoices.
#[derive(Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_drive_api_base")]
    pub api_base: String,

    /// OAuth bearer token with the `drive.file` scope.
    #[serde(default)]
    pub access_token: String,

    /// Parent folder for uploads; the Drive root when absent.
    #[serde(default)]
    pub folder_id: Option<String>,
}

fn default_drive_api_base() -> String {
    "https://www.googleapis.com".to_string()
}

impl Default for DriveConfig {
    fn default() -> Self {
        DriveConfig {
            enabled: false,
            api_base: default_drive_api_base(),
            access_token: String::new(),
            folder_id: None,
        }
    }
}

impl std::fmt::Debug for DriveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveConfig")
            .field("enabled", &self.enabled)
            .field("api_base", &self.api_base)
            .field("access_token", &"***")
            .field("folder_id", &self.folder_id)
            .finish()
    }
}
