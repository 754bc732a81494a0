//! Document/primary renderer
//!
//! The PDF renderer does not own a document engine. It asks a
//! [`DocumentEngineLoader`] for one on every call, so a missing or broken engine
//! surfaces as an [`ExportError::CapabilityLoad`] the coordinator can recover
//! from by switching to the print fallback.

pub mod writer;

use super::layout::{
    ReportLayout, FOOTER_LINES, RECOMMENDATIONS_HEADING, SUMMARY_HEADING, TABLE_HEADERS,
};
use super::{Artifact, RenderContext, Renderer};
use crate::domain::{ExportError, ExportFormat, QualitySummary};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use writer::{
    write_document, DocumentInfo, Font, PageContent, Rgb, TextStyle, A4_WIDTH_MM,
};

const HEADER_BLUE: Rgb = Rgb(33, 150, 243);
const FOOTER_GREY: Rgb = Rgb(100, 100, 100);

/// A loaded document-generation capability
pub trait DocumentEngine: Send + Sync {
    /// Engine name (for logging)
    fn name(&self) -> &'static str;

    /// Produce the document bytes for a laid-out report
    fn render(&self, layout: &ReportLayout, ctx: &RenderContext) -> Result<Vec<u8>, ExportError>;
}

/// Asynchronous factory for a [`DocumentEngine`]
///
/// Called once per document export; implementations must not assume caching.
#[async_trait]
pub trait DocumentEngineLoader: Send + Sync {
    async fn load(&self) -> Result<Box<dyn DocumentEngine>, ExportError>;
}

/// Loader for the built-in PDF writer
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinEngineLoader;

#[async_trait]
impl DocumentEngineLoader for BuiltinEngineLoader {
    async fn load(&self) -> Result<Box<dyn DocumentEngine>, ExportError> {
        tracing::debug!(engine = "builtin-pdf", "Loading document engine");
        Ok(Box::new(BuiltinPdfEngine))
    }
}

/// Loader that never provides an engine
///
/// Selected by `document.engine = "disabled"`; every document export then takes
/// the print fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledEngineLoader;

#[async_trait]
impl DocumentEngineLoader for DisabledEngineLoader {
    async fn load(&self) -> Result<Box<dyn DocumentEngine>, ExportError> {
        Err(ExportError::CapabilityLoad(
            "document engine disabled by configuration".to_string(),
        ))
    }
}

/// Single-page A4 report written with [`writer`]
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinPdfEngine;

impl DocumentEngine for BuiltinPdfEngine {
    fn name(&self) -> &'static str {
        "builtin-pdf"
    }

    fn render(&self, layout: &ReportLayout, ctx: &RenderContext) -> Result<Vec<u8>, ExportError> {
        let mut page = PageContent::new();
        let regular = |size| TextStyle::new(Font::Helvetica, size);
        let bold = |size| TextStyle::new(Font::HelveticaBold, size);
        let centre = A4_WIDTH_MM / 2.0;

        // Title band
        page.fill_rect(0.0, 0.0, A4_WIDTH_MM, 30.0, HEADER_BLUE);
        page.text(
            centre,
            20.0,
            bold(22.0).color(Rgb::WHITE).centered(),
            layout.title,
        );

        page.text(20.0, 45.0, regular(12.0), &layout.date_line);
        page.text(20.0, 52.0, regular(12.0), &layout.time_line);

        // Summary table
        let table_top = 70.0;
        page.text(20.0, table_top, bold(16.0), SUMMARY_HEADING);
        let columns = [25.0, 100.0, 140.0];
        for (header, x) in TABLE_HEADERS.iter().zip(columns) {
            page.text(x, table_top + 10.0, bold(12.0), header);
        }
        for (i, row) in layout.rows.iter().enumerate() {
            let y = table_top + 20.0 + i as f64 * 10.0;
            page.text(columns[0], y, regular(12.0), row.name);
            page.text(columns[1], y, regular(12.0), &row.value);
            page.text(columns[2], y, regular(12.0), row.status.label());
        }

        let recommendations_top = table_top + 30.0 + layout.rows.len() as f64 * 10.0;
        page.text(20.0, recommendations_top, bold(16.0), RECOMMENDATIONS_HEADING);
        for (i, recommendation) in layout.recommendations.iter().enumerate() {
            page.text(
                25.0,
                recommendations_top + 10.0 + i as f64 * 7.0,
                regular(12.0),
                &format!("• {recommendation}"),
            );
        }

        let footer = regular(10.0).color(FOOTER_GREY).centered();
        page.text(centre, 290.0, footer, FOOTER_LINES[0]);
        page.text(centre, 295.0, footer, FOOTER_LINES[1]);

        let info = DocumentInfo {
            title: layout.title.to_string(),
            producer: format!("prism {}", env!("CARGO_PKG_VERSION")),
            creation_date: ctx.generated_at().format("D:%Y%m%d%H%M%S").to_string(),
        };
        Ok(write_document(&page, &info))
    }
}

/// Document/primary renderer
pub struct PdfDocumentRenderer {
    loader: Arc<dyn DocumentEngineLoader>,
    load_timeout: Option<Duration>,
}

impl PdfDocumentRenderer {
    pub fn new(loader: Arc<dyn DocumentEngineLoader>) -> Self {
        Self {
            loader,
            load_timeout: None,
        }
    }

    /// Bound the engine load; expiry counts as a capability load failure
    pub fn with_load_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.load_timeout = timeout;
        self
    }

    async fn load_engine(&self) -> Result<Box<dyn DocumentEngine>, ExportError> {
        match self.load_timeout {
            Some(limit) => tokio::time::timeout(limit, self.loader.load())
                .await
                .map_err(|_| {
                    ExportError::CapabilityLoad(format!(
                        "engine did not load within {}s",
                        limit.as_secs_f64()
                    ))
                })?,
            None => self.loader.load().await,
        }
    }
}

#[async_trait]
impl Renderer for PdfDocumentRenderer {
    fn name(&self) -> &'static str {
        "pdf-document"
    }

    async fn render(
        &self,
        summary: &QualitySummary,
        ctx: &RenderContext,
    ) -> Result<Artifact, ExportError> {
        let engine = self.load_engine().await?;
        tracing::debug!(engine = engine.name(), "Document engine loaded");

        let layout = ReportLayout::build(summary, ctx);
        let bytes = engine.render(&layout, ctx)?;
        if !bytes.starts_with(b"%PDF-") {
            return Err(ExportError::Render(format!(
                "engine {} produced a non-PDF document",
                engine.name()
            )));
        }

        Ok(Artifact::download(
            ctx.filename_for(ExportFormat::Document),
            ExportFormat::Document.content_type(),
            bytes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> RenderContext {
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        RenderContext::new("rapport", at)
    }

    struct SlowLoader;

    #[async_trait]
    impl DocumentEngineLoader for SlowLoader {
        async fn load(&self) -> Result<Box<dyn DocumentEngine>, ExportError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Box::new(BuiltinPdfEngine))
        }
    }

    struct GarbageEngine;

    impl DocumentEngine for GarbageEngine {
        fn name(&self) -> &'static str {
            "garbage"
        }

        fn render(&self, _: &ReportLayout, _: &RenderContext) -> Result<Vec<u8>, ExportError> {
            Ok(b"not a pdf".to_vec())
        }
    }

    struct GarbageLoader;

    #[async_trait]
    impl DocumentEngineLoader for GarbageLoader {
        async fn load(&self) -> Result<Box<dyn DocumentEngine>, ExportError> {
            Ok(Box::new(GarbageEngine))
        }
    }

    #[tokio::test]
    async fn test_builtin_renders_pdf() {
        let renderer = PdfDocumentRenderer::new(Arc::new(BuiltinEngineLoader));
        let artifact = renderer
            .render(&QualitySummary::fallback_defaults(), &ctx())
            .await
            .unwrap();

        assert_eq!(artifact.filename, "rapport_2024-06-01.pdf");
        assert_eq!(artifact.content_type, "application/pdf");
        assert!(artifact.bytes.starts_with(b"%PDF-1.4"));

        let text = String::from_utf8_lossy(&artifact.bytes);
        assert!(text.contains("(Score Global) Tj"));
        assert!(text.contains("(84.5/100) Tj"));
        assert!(text.contains("(Date : 01/06/2024) Tj"));
        assert!(text.contains("/CreationDate (D:20240601083000)"));
    }

    #[tokio::test]
    async fn test_disabled_loader_fails_with_capability_error() {
        let renderer = PdfDocumentRenderer::new(Arc::new(DisabledEngineLoader));
        let err = renderer
            .render(&QualitySummary::fallback_defaults(), &ctx())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::CapabilityLoad(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_timeout() {
        let renderer = PdfDocumentRenderer::new(Arc::new(SlowLoader))
            .with_load_timeout(Some(Duration::from_secs(2)));
        let err = renderer
            .render(&QualitySummary::fallback_defaults(), &ctx())
            .await
            .unwrap_err();

        match err {
            ExportError::CapabilityLoad(msg) => assert!(msg.contains("2s")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_pdf_output_is_a_render_error() {
        let renderer = PdfDocumentRenderer::new(Arc::new(GarbageLoader));
        let err = renderer
            .render(&QualitySummary::fallback_defaults(), &ctx())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Render(_)));
    }
}
