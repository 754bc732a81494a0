//! Document/fallback renderer
//!
//! Lays the report out as a standalone HTML page and submits it to the print
//! pipeline. Used when the document engine cannot be loaded or fails.

use super::layout::{ReportLayout, RECOMMENDATIONS_HEADING, SUMMARY_HEADING, TABLE_HEADERS};
use super::{Artifact, RenderContext, Renderer};
use crate::adapters::print::{PrintJob, PrintPipeline};
use crate::domain::{ExportError, ExportFormat, QualitySummary};
use async_trait::async_trait;
use std::fmt::Write as _;
use std::sync::Arc;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

const STYLE: &str = "body { font-family: Arial, sans-serif; padding: 20px; }
h1 { color: #2196f3; }
table { border-collapse: collapse; width: 100%; margin: 20px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background: #2196f3; color: white; }";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the printable HTML page for a layout
pub fn render_html(layout: &ReportLayout) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"fr\">");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", escape_html(layout.title));
    let _ = writeln!(html, "<style>\n{STYLE}\n</style>");
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(layout.title));
    let _ = writeln!(html, "<p>{}</p>", escape_html(&layout.date_line));
    let _ = writeln!(html, "<p>{}</p>", escape_html(&layout.time_line));

    let _ = writeln!(html, "<h2>{}</h2>", escape_html(SUMMARY_HEADING));
    let _ = writeln!(html, "<table>");
    let header: String = TABLE_HEADERS
        .iter()
        .map(|h| format!("<th>{}</th>", escape_html(h)))
        .collect();
    let _ = writeln!(html, "<tr>{header}</tr>");
    for row in &layout.rows {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(row.name),
            escape_html(&row.value),
            escape_html(row.status.label())
        );
    }
    let _ = writeln!(html, "</table>");

    let _ = writeln!(html, "<h2>{}</h2>", escape_html(RECOMMENDATIONS_HEADING));
    let _ = writeln!(html, "<ul>");
    for recommendation in &layout.recommendations {
        let _ = writeln!(html, "<li>{}</li>", escape_html(recommendation));
    }
    let _ = writeln!(html, "</ul>");
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}

/// Document/fallback renderer
///
/// The returned artifact carries the submitted HTML with a `Printed`
/// disposition; it is never handed to the download sink.
pub struct PrintFallbackRenderer {
    pipeline: Arc<dyn PrintPipeline>,
}

impl PrintFallbackRenderer {
    pub fn new(pipeline: Arc<dyn PrintPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl Renderer for PrintFallbackRenderer {
    fn name(&self) -> &'static str {
        "print-fallback"
    }

    async fn render(
        &self,
        summary: &QualitySummary,
        ctx: &RenderContext,
    ) -> Result<Artifact, ExportError> {
        let layout = ReportLayout::build(summary, ctx);
        let html = render_html(&layout);
        let filename = ctx.filename_for(ExportFormat::Document);

        let job = PrintJob::new(filename.clone(), html);
        self.pipeline
            .submit(&job)
            .await
            .map_err(|e| ExportError::Delivery(format!("print pipeline rejected job: {e}")))?;

        Ok(Artifact::printed(
            filename,
            HTML_CONTENT_TYPE,
            job.html.into_bytes(),
        ))
    }
}
