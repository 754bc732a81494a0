//! Configuration schema types
//!
//! This module defines the configuration structure for Prism. Every section is
//! optional in the TOML file and falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main Prism configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrismConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Metrics API (summary provider) settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Document engine settings
    #[serde(default)]
    pub document: DocumentConfig,

    /// Print pipeline settings
    #[serde(default)]
    pub print: PrintConfig,

    /// Notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PrismConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.export.validate()?;
        self.document.validate()?;
        self.print.validate()?;
        self.notifications.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Metrics API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the metrics API
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Path of the quality summary endpoint
    #[serde(default = "default_summary_path")]
    pub summary_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid api.base_url '{}': {e}", self.base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if !self.summary_path.starts_with('/') {
            return Err("api.summary_path must start with '/'".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            summary_path: default_summary_path(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Filename base for produced artifacts
    #[serde(default = "default_filename_base")]
    pub filename_base: String,

    /// Directory that receives downloaded artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fail instead of substituting defaults when no summary is available
    #[serde(default)]
    pub strict_summary: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.filename_base.trim().is_empty() {
            return Err("export.filename_base cannot be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_base: default_filename_base(),
            output_dir: default_output_dir(),
            strict_summary: false,
        }
    }
}

/// Document engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentEngineKind {
    /// Built-in PDF writer
    #[default]
    Builtin,
    /// No document engine; every document export uses the print fallback
    Disabled,
}

/// Document engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Which engine the loader provides
    #[serde(default)]
    pub engine: DocumentEngineKind,

    /// Maximum time to wait for the engine to load (0 disables the limit)
    #[serde(default = "default_load_timeout_seconds")]
    pub load_timeout_seconds: u64,
}

impl DocumentConfig {
    fn validate(&self) -> Result<(), String> {
        if self.load_timeout_seconds > 300 {
            return Err("document.load_timeout_seconds cannot exceed 300".to_string());
        }
        Ok(())
    }

    /// Load timeout, `None` when disabled
    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_seconds > 0).then(|| Duration::from_secs(self.load_timeout_seconds))
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            engine: DocumentEngineKind::default(),
            load_timeout_seconds: default_load_timeout_seconds(),
        }
    }
}

/// Print pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Directory where print jobs are spooled as HTML
    #[serde(default = "default_spool_dir")]
    pub spool_dir: PathBuf,

    /// Command invoked with the spooled file path appended (e.g. `["lp"]`)
    #[serde(default)]
    pub command: Vec<String>,
}

impl PrintConfig {
    fn validate(&self) -> Result<(), String> {
        if self.spool_dir.as_os_str().is_empty() {
            return Err("print.spool_dir cannot be empty".to_string());
        }
        if let Some(program) = self.command.first() {
            if program.trim().is_empty() {
                return Err("print.command program cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            spool_dir: default_spool_dir(),
            command: Vec::new(),
        }
    }
}

/// Notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Seconds after which the UI dismisses a notification
    #[serde(default = "default_auto_dismiss_secs")]
    pub auto_dismiss_secs: u64,
}

impl NotificationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.auto_dismiss_secs == 0 {
            return Err("notifications.auto_dismiss_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn auto_dismiss(&self) -> Duration {
        Duration::from_secs(self.auto_dismiss_secs)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_secs: default_auto_dismiss_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_summary_path() -> String {
    "/api/quality-summary".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_filename_base() -> String {
    crate::domain::request::DEFAULT_FILENAME_BASE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./exports")
}

fn default_load_timeout_seconds() -> u64 {
    10
}

fn default_spool_dir() -> PathBuf {
    PathBuf::from("./exports/print")
}

fn default_auto_dismiss_secs() -> u64 {
    5
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PrismConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.notifications.auto_dismiss(), Duration::from_secs(5));
        assert_eq!(config.export.filename_base, "data_quality_report");
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_config_validation() {
        let mut config = ApiConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "ftp://metrics.example.com".to_string();
        assert!(config.validate().unwrap_err().contains("http or https"));

        config.base_url = "https://metrics.example.com".to_string();
        config.summary_path = "api/quality-summary".to_string();
        assert!(config.validate().is_err());

        config.summary_path = "/api/quality-summary".to_string();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.filename_base = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_document_load_timeout() {
        let mut config = DocumentConfig::default();
        assert_eq!(config.load_timeout(), Some(Duration::from_secs(10)));

        config.load_timeout_seconds = 0;
        assert_eq!(config.load_timeout(), None);

        config.load_timeout_seconds = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_print_config_validation() {
        let mut config = PrintConfig::default();
        assert!(config.validate().is_ok());

        config.command = vec!["".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_content = r#"
[document]
engine = "disabled"

[print]
command = ["lp", "-d", "office"]
"#;
        let config: PrismConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.document.engine, DocumentEngineKind::Disabled);
        assert_eq!(config.print.command, vec!["lp", "-d", "office"]);
        assert_eq!(config.api.base_url, "http://localhost:5001");
    }
}
