//! Delimited-text renderers (Spreadsheet and FlatText)
//!
//! Both produce UTF-8 `;`-separated text with one header row and one row per
//! metric. Neither has a dynamic dependency, so neither has a fallback.

use super::status::{metric_rows, spreadsheet_rows};
use super::{Artifact, RenderContext, Renderer};
use crate::domain::{ExportError, ExportFormat, QualitySummary};
use async_trait::async_trait;

pub const DELIMITER: char = ';';

/// Join cells with the delimiter, quoting any cell that contains it
fn write_row(out: &mut String, cells: &[&str]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        if cell.contains(DELIMITER) || cell.contains('"') || cell.contains('\n') {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
}

fn join_lines(rows: &[Vec<&str>]) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_row(&mut out, row);
    }
    out
}

/// `Métrique;Valeur;Statut` rows
#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetRenderer;

impl SpreadsheetRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the delimited text without wrapping it in an artifact
    pub fn render_text(summary: &QualitySummary) -> String {
        let rows = spreadsheet_rows(summary);
        let mut lines: Vec<Vec<&str>> = vec![vec!["Métrique", "Valeur", "Statut"]];
        for row in &rows {
            lines.push(vec![row.name, row.value.as_str(), row.status.label()]);
        }
        join_lines(&lines)
    }
}

#[async_trait]
impl Renderer for SpreadsheetRenderer {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    async fn render(
        &self,
        summary: &QualitySummary,
        ctx: &RenderContext,
    ) -> Result<Artifact, ExportError> {
        let text = Self::render_text(summary);
        Ok(Artifact::download(
            ctx.filename_for(ExportFormat::Spreadsheet),
            ExportFormat::Spreadsheet.content_type(),
            text.into_bytes(),
        ))
    }
}

/// `Métrique;Valeur;Date` rows, every row stamped with the generation date
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatTextRenderer;

impl FlatTextRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_text(summary: &QualitySummary, ctx: &RenderContext) -> String {
        let date = ctx.display_date();
        let rows = metric_rows(summary);
        let mut lines: Vec<Vec<&str>> = vec![vec!["Métrique", "Valeur", "Date"]];
        for row in &rows {
            lines.push(vec![row.name, row.value.as_str(), date.as_str()]);
        }
        join_lines(&lines)
    }
}

#[async_trait]
impl Renderer for FlatTextRenderer {
    fn name(&self) -> &'static str {
        "flat-text"
    }

    async fn render(
        &self,
        summary: &QualitySummary,
        ctx: &RenderContext,
    ) -> Result<Artifact, ExportError> {
        let text = Self::render_text(summary, ctx);
        Ok(Artifact::download(
            ctx.filename_for(ExportFormat::FlatText),
            ExportFormat::FlatText.content_type(),
            text.into_bytes(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::Disposition;
    use chrono::NaiveDate;

    fn scenario_summary() -> QualitySummary {
        QualitySummary {
            success_rate: 92.5,
            passed_checks: 185,
            failed_checks: 10,
            warning_checks: 5,
            total_checks: 200,
            total_anomalies: 3,
            new_anomalies: None,
            high_severity_anomalies: None,
        }
    }

    fn ctx() -> RenderContext {
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        RenderContext::new("data_quality_report", at)
    }

    #[test]
    fn test_spreadsheet_text() {
        let text = SpreadsheetRenderer::render_text(&scenario_summary());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Métrique;Valeur;Statut");
        assert_eq!(lines[1], "Taux de Réussite;92.5%;Excellent");
        assert_eq!(lines[2], "Contrôles Validés;185;Conforme");
        assert_eq!(lines[3], "Contrôles en Échec;10;À surveiller");
        assert_eq!(lines[4], "Anomalies Actives;3;Présence");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_spreadsheet_labels_below_threshold() {
        let summary = QualitySummary {
            success_rate: 70.0,
            failed_checks: 0,
            total_anomalies: 4,
            ..scenario_summary()
        };
        let text = SpreadsheetRenderer::render_text(&summary);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "Taux de Réussite;70%;Bon");
        assert_eq!(lines[3], "Contrôles en Échec;0;À surveiller");
        assert_eq!(lines[4], "Anomalies Actives;4;Présence");

        let none = QualitySummary {
            total_anomalies: 0,
            ..summary
        };
        assert!(SpreadsheetRenderer::render_text(&none).ends_with("Anomalies Actives;0;Absence"));
    }

    #[test]
    fn test_flat_text_has_date_column() {
        let text = FlatTextRenderer::render_text(&scenario_summary(), &ctx());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Métrique;Valeur;Date");
        assert_eq!(lines[1], "Taux de Réussite;92.5%;01/06/2024");
        assert!(lines[1..].iter().all(|l| l.ends_with(";01/06/2024")));
    }

    #[tokio::test]
    async fn test_spreadsheet_artifact() {
        let artifact = SpreadsheetRenderer::new()
            .render(&scenario_summary(), &ctx())
            .await
            .unwrap();

        assert_eq!(artifact.filename, "data_quality_report_2024-06-01.csv");
        assert_eq!(artifact.disposition, Disposition::Download);
        assert!(String::from_utf8(artifact.bytes).is_ok());
    }

    #[tokio::test]
    async fn test_renderers_are_deterministic() {
        let summary = scenario_summary();
        let ctx = ctx();

        let a = FlatTextRenderer::new().render(&summary, &ctx).await.unwrap();
        let b = FlatTextRenderer::new().render(&summary, &ctx).await.unwrap();
        assert_eq!(a.bytes, b.bytes);

        let a = SpreadsheetRenderer::new().render(&summary, &ctx).await.unwrap();
        let b = SpreadsheetRenderer::new().render(&summary, &ctx).await.unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_write_row_quotes_delimiter() {
        let mut out = String::new();
        write_row(&mut out, &["a;b", "c\"d", "e"]);
        assert_eq!(out, "\"a;b\";\"c\"\"d\";e");
    }
}
