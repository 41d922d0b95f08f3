//! # Billing API Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ZEVAR_PORT=8080                                                    │
//! │     ZEVAR_SMTP_PASSWORD=...                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/zevar/billing.toml (Linux)                               │
//! │     ~/Library/Application Support/in.zevarclub.zevar/billing.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [database]
//! path = "/var/lib/zevar/billing.db"
//!
//! [store]
//! name = "Zevar Club"
//!
//! [smtp]
//! username = "counter@zevarclub.in"
//! password = "app-password"
//!
//! [pdf]
//! chromium_path = "/usr/bin/chromium"
//!
//! [drive]
//! enabled = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use zevar_services::{DriveConfig, PdfConfig, SmtpConfig, StoreProfile};

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "ZEVAR_";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    /// `0` picks a free port (tests).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// SQLite settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file; the platform data directory when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DatabaseSettings {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("billing.db")))
            .unwrap_or_else(|| PathBuf::from("zevar_billing.db"))
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete billing-api configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub store: StoreProfile,

    #[serde(default)]
    pub smtp: SmtpConfig,

    #[serde(default)]
    pub pdf: PdfConfig,

    #[serde(default)]
    pub drive: DriveConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (billing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading billing config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load billing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Billing config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }

        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        if self.pdf.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "pdf.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.drive.enabled && self.drive.access_token.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "drive.access_token is required when drive is enabled".into(),
            ));
        }

        if self.drive.enabled
            && !self.drive.api_base.starts_with("https://")
            && !self.drive.api_base.starts_with("http://")
        {
            return Err(ConfigError::Invalid(format!(
                "drive.api_base must be an http(s) URL, got: {}",
                self.drive.api_base
            )));
        }

        Ok(())
    }

    /// Applies `ZEVAR_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("PORT") {
            match port.parse::<u16>() {
                Ok(p) => {
                    debug!(port = p, "Overriding port from environment");
                    self.server.port = p;
                }
                Err(_) => warn!(port = %port, "Ignoring invalid port in environment"),
            }
        }

        if let Some(path) = var("DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(name) = var("STORE_NAME") {
            self.store.name = name;
        }

        if let Some(host) = var("SMTP_HOST") {
            self.smtp.host = host;
        }

        if let Some(port) = var("SMTP_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                self.smtp.port = p;
            }
        }

        if let Some(username) = var("SMTP_USERNAME") {
            self.smtp.username = username;
        }

        if let Some(password) = var("SMTP_PASSWORD") {
            self.smtp.password = password;
        }

        if let Some(path) = var("CHROMIUM_PATH") {
            self.pdf.chromium_path = PathBuf::from(path);
        }

        if let Some(enabled) = var("DRIVE_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.drive.enabled = true,
                "0" | "false" | "no" => self.drive.enabled = false,
                _ => warn!(value = %enabled, "Unknown drive toggle in environment"),
            }
        }

        if let Some(token) = var("DRIVE_ACCESS_TOKEN") {
            self.drive.access_token = token;
        }

        if let Some(folder) = var("DRIVE_FOLDER_ID") {
            self.drive.folder_id = Some(folder);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("billing.toml"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("in", "zevarclub", "zevar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.name, "Zevar Club");
        assert!(!config.smtp.is_configured());
        assert!(!config.drive.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billing.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8088

[database]
path = "/tmp/zevar-test.db"

[pdf]
timeout_secs = 12
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(path)).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.database.resolved_path(),
            PathBuf::from("/tmp/zevar-test.db")
        );
        assert_eq!(config.pdf.timeout_secs, 12);
        assert_eq!(config.smtp.port, 587);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billing.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        assert!(matches!(
            AppConfig::load(Some(path.clone())),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(AppConfig::load_or_default(Some(path)).server.port, 3000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("billing.toml");

        let mut config = AppConfig::default();
        config.server.port = 9099;
        config.store.name = "Zevar Club Bistupur".into();
        config.save(Some(path.clone())).unwrap();

        let reloaded = AppConfig::load(Some(path)).unwrap();
        assert_eq!(reloaded.server.port, 9099);
        assert_eq!(reloaded.store.name, "Zevar Club Bistupur");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "4000"),
            ("SMTP_USERNAME", "counter@zevarclub.in"),
            ("SMTP_PASSWORD", "secret"),
            ("DRIVE_ENABLED", "true"),
            ("DRIVE_ACCESS_TOKEN", "token"),
            ("DATABASE_PATH", "/data/billing.db"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 4000);
        assert!(config.smtp.is_configured());
        assert!(config.drive.enabled);
        assert_eq!(config.database.path, Some(PathBuf::from("/data/billing.db")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.drive.enabled = true;
        assert!(config.validate().is_err());

        config.drive.access_token = "token".into();
        assert!(config.validate().is_ok());

        config.drive.api_base = "ftp://example.com".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.pdf.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
