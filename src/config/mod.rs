//! Configuration management for Prism.
//!
//! # Overview
//!
//! Prism reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PRISM_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ApiConfig`] - Metrics API endpoint and timeout
//! - [`ExportConfig`] - Filename base, download directory, strict summaries
//! - [`DocumentConfig`] - Document engine selection and load timeout
//! - [`PrintConfig`] - Print spool directory and command
//! - [`NotificationConfig`] - Notification dismissal interval
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "${PRISM_METRICS_URL}"
//!
//! [export]
//! filename_base = "data_quality_report"
//! output_dir = "./exports"
//!
//! [document]
//! engine = "builtin"
//! load_timeout_seconds = 10
//!
//! [print]
//! spool_dir = "./exports/print"
//! command = ["lp"]
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApiConfig, ApplicationConfig, DocumentConfig, DocumentEngineKind, ExportConfig,
    LoggingConfig, NotificationConfig, PrintConfig, PrismConfig,
};
