//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - console output on stderr
//! - configurable log levels (`RUST_LOG` wins over the configured level)
//! - optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use prism::logging::init_logging;
//! use prism::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use prism::log_export_start;
/// use prism::domain::{ExportFormat, ExportRequest};
///
/// let request = ExportRequest::new(ExportFormat::Document);
/// log_export_start!(request.id(), request.format());
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($request_id:expr, $format:expr) => {
        tracing::info!(
            request_id = %$request_id,
            format = %$format,
            "Starting export"
        );
    };
}

/// Log the outcome of an export at a level matching its result
///
/// # Example
///
/// ```no_run
/// use prism::log_export_outcome;
/// use prism::domain::{ExportFormat, ExportOutcome};
/// use std::time::Duration;
///
/// let outcome = ExportOutcome::Success { filename: "r.csv".to_string() };
/// let elapsed = Duration::from_millis(4);
/// log_export_outcome!(uuid::Uuid::nil(), ExportFormat::FlatText, &outcome, elapsed);
/// ```
#[macro_export]
macro_rules! log_export_outcome {
    ($request_id:expr, $format:expr, $outcome:expr, $duration:expr) => {{
        let outcome: &$crate::domain::ExportOutcome = $outcome;
        let reason = outcome.reason().map(|r| r.to_string()).unwrap_or_default();
        match outcome {
            $crate::domain::ExportOutcome::Success { .. } => tracing::info!(
                request_id = %$request_id,
                format = %$format,
                outcome = outcome.label(),
                filename = outcome.filename().unwrap_or_default(),
                duration_ms = $duration.as_millis() as u64,
                "Export completed"
            ),
            $crate::domain::ExportOutcome::Degraded { .. } => tracing::warn!(
                request_id = %$request_id,
                format = %$format,
                outcome = outcome.label(),
                filename = outcome.filename().unwrap_or_default(),
                reason = %reason,
                duration_ms = $duration.as_millis() as u64,
                "Export completed in degraded mode"
            ),
            $crate::domain::ExportOutcome::Failure { .. } => tracing::error!(
                request_id = %$request_id,
                format = %$format,
                outcome = outcome.label(),
                reason = %reason,
                duration_ms = $duration.as_millis() as u64,
                "Export failed"
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::domain::{ExportError, ExportFormat, ExportOutcome};
    use std::time::Duration;
    use uuid::Uuid;

    #[test]
    fn test_macros_accept_every_outcome() {
        let outcomes = [
            ExportOutcome::Success {
                filename: "r.pdf".to_string(),
            },
            ExportOutcome::Degraded {
                filename: "r.pdf".to_string(),
                reason: ExportError::CapabilityLoad("x".to_string()),
            },
            ExportOutcome::Failure {
                reason: ExportError::Render("y".to_string()),
            },
        ];

        let id = Uuid::new_v4();
        log_export_start!(id, ExportFormat::Document);
        for outcome in &outcomes {
            log_export_outcome!(id, ExportFormat::Document, outcome, Duration::from_millis(1));
        }
    }
}
