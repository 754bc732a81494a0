//! Export command implementation
//!
//! Runs one export through the orchestrator. The summary comes from a JSON file,
//! from the metrics API (`--fetch`), or from nowhere, in which case the default
//! record is used.

use crate::adapters::metrics_api::{MetricsApiClient, SummaryEnvelope, SummaryProvider};
use crate::config::load_config_or_default;
use crate::core::export::create_orchestrator;
use crate::core::notify::{ConsoleNotifier, NotificationSink, TracingNotifier};
use crate::domain::{ExportFormat, ExportOutcome, ExportRequest, PartialSummary, PrismError};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Exit code for a successful export
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when the artifact was produced by a fallback renderer
pub const EXIT_DEGRADED: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code when the summary could not be obtained
pub const EXIT_SUMMARY: i32 = 3;
/// Exit code when no artifact could be produced or delivered
pub const EXIT_EXPORT_FAILED: i32 = 4;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format (document|pdf, spreadsheet|excel, flat-text|csv)
    #[arg(short, long)]
    pub format: ExportFormat,

    /// Read the summary from a JSON file (bare summary or API envelope)
    #[arg(long, value_name = "FILE", conflicts_with = "fetch")]
    pub summary_file: Option<PathBuf>,

    /// Fetch the summary from the metrics API
    #[arg(long)]
    pub fetch: bool,

    /// Override the artifact filename base
    #[arg(long)]
    pub filename_base: Option<String>,

    /// Override the download directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Send notifications to the log instead of the terminal
    #[arg(short, long)]
    pub quiet: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(format = %self.format, "Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir.display(), "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }
        if let Some(base) = &self.filename_base {
            config.export.filename_base = base.clone();
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let summary = match self.obtain_summary(&config.api).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Failed to obtain summary");
                eprintln!("❌ {e}");
                return Ok(EXIT_SUMMARY);
            }
        };

        let notifier: Arc<dyn NotificationSink> = if self.quiet {
            Arc::new(TracingNotifier)
        } else {
            Arc::new(ConsoleNotifier)
        };
        let orchestrator = create_orchestrator(&config, notifier);

        let request = ExportRequest::new(self.format)
            .with_partial_summary(summary)
            .with_filename_base(&config.export.filename_base);

        let outcome = match orchestrator.export(&request).await {
            Ok(outcome) => outcome,
            Err(rejected) => {
                eprintln!("❌ {rejected}");
                return Ok(EXIT_EXPORT_FAILED);
            }
        };

        if !self.quiet {
            if let Some(location) = artifact_location(&outcome, self.format, &config) {
                println!("   {}", location.display());
            }
        }

        Ok(exit_code(&outcome))
    }

    async fn obtain_summary(
        &self,
        api: &crate::config::ApiConfig,
    ) -> crate::domain::Result<Option<PartialSummary>> {
        if let Some(path) = &self.summary_file {
            return read_summary_file(path).await;
        }
        if self.fetch {
            let client = MetricsApiClient::new(api)?;
            return client.fetch_summary().await;
        }
        Ok(None)
    }
}

/// Parse a summary file holding either a bare summary or the API envelope
pub async fn read_summary_file(path: &Path) -> crate::domain::Result<Option<PartialSummary>> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        PrismError::SummaryProvider(format!("failed to read {}: {e}", path.display()))
    })?;

    let value: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
        PrismError::SummaryProvider(format!("invalid JSON in {}: {e}", path.display()))
    })?;

    let invalid = |e: serde_json::Error| {
        PrismError::SummaryProvider(format!("invalid summary in {}: {e}", path.display()))
    };

    if value.get("success").is_some() {
        let envelope: SummaryEnvelope = serde_json::from_value(value).map_err(invalid)?;
        Ok(envelope.into_summary())
    } else {
        let summary: PartialSummary = serde_json::from_value(value).map_err(invalid)?;
        Ok(Some(summary).filter(|s| !s.is_empty()))
    }
}

/// Process exit code for an outcome
pub fn exit_code(outcome: &ExportOutcome) -> i32 {
    match outcome {
        ExportOutcome::Success { .. } => EXIT_SUCCESS,
        ExportOutcome::Degraded { .. } => EXIT_DEGRADED,
        ExportOutcome::Failure { .. } => EXIT_EXPORT_FAILED,
    }
}

/// Where the produced file ended up
fn artifact_location(
    outcome: &ExportOutcome,
    format: ExportFormat,
    config: &crate::config::PrismConfig,
) -> Option<PathBuf> {
    let filename = outcome.filename()?;
    if outcome.is_degraded() && format == ExportFormat::Document {
        let stem = filename.strip_suffix(".pdf").unwrap_or(filename);
        return Some(config.print.spool_dir.join(format!("{stem}.html")));
    }
    Some(config.export.output_dir.join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrismConfig;
    use crate::domain::ExportError;
    use tempfile::TempDir;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code(&ExportOutcome::Success {
                filename: "a".to_string()
            }),
            0
        );
        assert_eq!(
            exit_code(&ExportOutcome::Degraded {
                filename: "a".to_string(),
                reason: ExportError::CapabilityLoad("x".to_string()),
            }),
            1
        );
        assert_eq!(
            exit_code(&ExportOutcome::Failure {
                reason: ExportError::Render("x".to_string()),
            }),
            4
        );
    }

    #[tokio::test]
    async fn test_read_bare_summary_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        std::fs::write(&path, r#"{"success_rate": 92.5, "total_anomalies": 3}"#).unwrap();

        let summary = read_summary_file(&path).await.unwrap().unwrap();
        assert_eq!(summary.success_rate, Some(92.5));
        assert_eq!(summary.passed_checks, None);
    }

    #[tokio::test]
    async fn test_read_envelope_summary_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        std::fs::write(&path, r#"{"success": true, "summary": {"failed_checks": 0}}"#).unwrap();

        let summary = read_summary_file(&path).await.unwrap().unwrap();
        assert_eq!(summary.failed_checks, Some(0));
    }

    #[tokio::test]
    async fn test_read_invalid_summary_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(matches!(
            read_summary_file(&path).await,
            Err(PrismError::SummaryProvider(_))
        ));
        assert!(matches!(
            read_summary_file(&dir.path().join("missing.json")).await,
            Err(PrismError::SummaryProvider(_))
        ));
    }

    #[test]
    fn test_artifact_location() {
        let config = PrismConfig::default();
        let degraded = ExportOutcome::Degraded {
            filename: "r_2024-06-01.pdf".to_string(),
            reason: ExportError::CapabilityLoad("x".to_string()),
        };
        assert_eq!(
            artifact_location(&degraded, ExportFormat::Document, &config).unwrap(),
            config.print.spool_dir.join("r_2024-06-01.html")
        );

        let ok = ExportOutcome::Success {
            filename: "r_2024-06-01.csv".to_string(),
        };
        assert_eq!(
            artifact_location(&ok, ExportFormat::FlatText, &config).unwrap(),
            config.export.output_dir.join("r_2024-06-01.csv")
        );
    }
}
