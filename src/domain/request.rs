//! Export requests

use super::format::ExportFormat;
use super::summary::{PartialSummary, QualitySummary};
use uuid::Uuid;

/// Filename base used when none is supplied
pub const DEFAULT_FILENAME_BASE: &str = "data_quality_report";

/// One user-triggered export
///
/// Immutable once built; discarded after the export completes.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    id: Uuid,
    format: ExportFormat,
    summary: Option<PartialSummary>,
    filename_base: String,
}

impl ExportRequest {
    /// Create a request without summary data (defaults will be substituted)
    pub fn new(format: ExportFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            format,
            summary: None,
            filename_base: DEFAULT_FILENAME_BASE.to_string(),
        }
    }

    /// Attach a complete summary
    pub fn with_summary(mut self, summary: QualitySummary) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attach a summary as received from the metrics API
    pub fn with_partial_summary(mut self, summary: Option<PartialSummary>) -> Self {
        self.summary = summary;
        self
    }

    /// Set the filename base, sanitised for use as a file name
    pub fn with_filename_base(mut self, base: impl AsRef<str>) -> Self {
        self.filename_base = sanitize_filename_base(base.as_ref());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn summary(&self) -> Option<&PartialSummary> {
        self.summary.as_ref()
    }

    pub fn filename_base(&self) -> &str {
        &self.filename_base
    }
}

/// Replace characters that are unsafe in file names with `_`
///
/// An empty or all-whitespace base falls back to [`DEFAULT_FILENAME_BASE`].
pub fn sanitize_filename_base(base: &str) -> String {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return DEFAULT_FILENAME_BASE.to_string();
    }

    trimmed
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}
