//! Format renderers
//!
//! A renderer turns a [`QualitySummary`] into one [`Artifact`]. Renderers are
//! strategies: the fallback coordinator holds an ordered list of them per
//! [`ExportFormat`] and tries them in turn.
//!
//! - [`PdfDocumentRenderer`] - PDF through a dynamically loaded document engine
//! - [`PrintFallbackRenderer`] - HTML handed to the print pipeline
//! - [`SpreadsheetRenderer`] - `;`-separated rows with a status column
//! - [`FlatTextRenderer`] - `;`-separated rows with a date column

pub mod delimited;
pub mod layout;
pub mod pdf;
pub mod print;
pub mod status;

pub use delimited::{FlatTextRenderer, SpreadsheetRenderer};
pub use layout::ReportLayout;
pub use pdf::{
    BuiltinEngineLoader, DisabledEngineLoader, DocumentEngine, DocumentEngineLoader,
    PdfDocumentRenderer,
};
pub use print::PrintFallbackRenderer;

use crate::domain::{ExportError, ExportFormat, QualitySummary};
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// What happens to an artifact once rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Hand the bytes to the download sink
    Download,
    /// Already submitted to the print pipeline by the renderer
    Printed,
}

/// Rendered export artifact
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Suggested file name (`<base>_<YYYY-MM-DD>.<ext>`)
    pub filename: String,

    /// MIME type of `bytes`
    pub content_type: &'static str,

    /// Artifact content
    pub bytes: Vec<u8>,

    /// Where the artifact goes next
    pub disposition: Disposition,
}

impl Artifact {
    pub fn download(filename: String, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            filename,
            content_type,
            bytes,
            disposition: Disposition::Download,
        }
    }

    pub fn printed(filename: String, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            filename,
            content_type,
            bytes,
            disposition: Disposition::Printed,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Per-request rendering inputs other than the summary
///
/// Carrying the timestamp here keeps renderers deterministic for a given context.
#[derive(Debug, Clone)]
pub struct RenderContext {
    filename_base: String,
    generated_at: NaiveDateTime,
}

impl RenderContext {
    pub fn new(filename_base: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            filename_base: filename_base.into(),
            generated_at,
        }
    }

    pub fn filename_base(&self) -> &str {
        &self.filename_base
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    /// `<base>_<YYYY-MM-DD>.<ext>` for the given format
    pub fn filename_for(&self, format: ExportFormat) -> String {
        format!(
            "{}_{}.{}",
            self.filename_base,
            self.generated_at.format("%Y-%m-%d"),
            format.extension()
        )
    }

    /// Date as shown in report bodies (`DD/MM/YYYY`)
    pub fn display_date(&self) -> String {
        self.generated_at.format("%d/%m/%Y").to_string()
    }

    /// Time as shown in report bodies (`HH:MM:SS`)
    pub fn display_time(&self) -> String {
        self.generated_at.format("%H:%M:%S").to_string()
    }
}

/// A strategy producing one artifact format from a summary
///
/// Implementations must not mutate the summary. They may perform I/O (loading
/// an engine, submitting a print job); failures are returned, never panicked.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Name of the renderer (for logging)
    fn name(&self) -> &'static str;

    /// Render `summary` into an artifact
    async fn render(
        &self,
        summary: &QualitySummary,
        ctx: &RenderContext,
    ) -> Result<Artifact, ExportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_context() -> RenderContext {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap();
        RenderContext::new("rapport", at)
    }

    #[test]
    fn test_filename_for() {
        let ctx = fixed_context();
        assert_eq!(
            ctx.filename_for(ExportFormat::Document),
            "rapport_2024-03-07.pdf"
        );
        assert_eq!(
            ctx.filename_for(ExportFormat::FlatText),
            "rapport_2024-03-07.csv"
        );
    }

    #[test]
    fn test_display_date_and_time() {
        let ctx = fixed_context();
        assert_eq!(ctx.display_date(), "07/03/2024");
        assert_eq!(ctx.display_time(), "09:05:30");
    }

    #[test]
    fn test_artifact_constructors() {
        let artifact = Artifact::download("a.csv".into(), "text/csv", b"x".to_vec());
        assert_eq!(artifact.disposition, Disposition::Download);
        assert_eq!(artifact.len(), 1);

        let printed = Artifact::printed("a.pdf".into(), "text/html", Vec::new());
        assert_eq!(printed.disposition, Disposition::Printed);
        assert!(printed.is_empty());
    }
}
