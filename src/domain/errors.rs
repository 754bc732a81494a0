//! Domain error types
//!
//! This module defines the error hierarchy for Prism. Export failures use the
//! clonable [`ExportError`] taxonomy so they can travel inside an
//! [`ExportOutcome`](crate::domain::ExportOutcome); everything else surfaces as
//! [`PrismError`]. No third-party error types leak through either enum.

use thiserror::Error;

/// Main Prism error type
///
/// Used for configuration, summary retrieval and host-level failures. Export
/// failures never escape the orchestrator as a `PrismError`; they are folded into
/// an outcome value instead.
#[derive(Debug, Error)]
pub enum PrismError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Metrics API (summary provider) errors
    #[error("Summary provider error: {0}")]
    SummaryProvider(String),

    /// Export engine errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Export failure taxonomy
///
/// Every renderer, loader and delivery failure is expressed with one of these
/// variants. The coordinator and orchestrator capture them into an outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The document-generation capability could not be obtained
    #[error("document engine unavailable: {0}")]
    CapabilityLoad(String),

    /// A renderer ran but could not produce a valid artifact
    #[error("rendering failed: {0}")]
    Render(String),

    /// The artifact was produced but could not be handed over
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// A renderer or the coordinator panicked, or no data was available
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ExportError {
    /// Short machine-friendly name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CapabilityLoad(_) => "capability_load",
            Self::Render(_) => "render",
            Self::Delivery(_) => "delivery",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

/// Returned when `export()` is called while another export is still running
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("an export is already in progress")]
pub struct ExportRejected;

impl From<std::io::Error> for PrismError {
    fn from(err: std::io::Error) -> Self {
        PrismError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PrismError {
    fn from(err: serde_json::Error) -> Self {
        PrismError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PrismError {
    fn from(err: toml::de::Error) -> Self {
        PrismError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prism_error_display() {
        let err = PrismError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_export_error_conversion() {
        let export_err = ExportError::Delivery("disk full".to_string());
        let prism_err: PrismError = export_err.into();
        assert!(matches!(prism_err, PrismError::Export(_)));
        assert_eq!(
            prism_err.to_string(),
            "Export error: delivery failed: disk full"
        );
    }

    #[test]
    fn test_export_error_kind() {
        assert_eq!(
            ExportError::CapabilityLoad("x".into()).kind(),
            "capability_load"
        );
        assert_eq!(ExportError::Render("x".into()).kind(), "render");
        assert_eq!(ExportError::Delivery("x".into()).kind(), "delivery");
        assert_eq!(ExportError::Unexpected("x".into()).kind(), "unexpected");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let prism_err: PrismError = io_err.into();
        assert!(matches!(prism_err, PrismError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let prism_err: PrismError = json_err.into();
        assert!(matches!(prism_err, PrismError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let prism_err: PrismError = toml_err.into();
        assert!(matches!(prism_err, PrismError::Configuration(_)));
        assert!(prism_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_export_rejected_display() {
        assert_eq!(ExportRejected.to_string(), "an export is already in progress");
    }
}
