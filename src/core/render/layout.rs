//! Report layout shared by the document renderers
//!
//! Both the PDF renderer and the print fallback lay out the same content: a
//! title, the generation date and time, the performance table and a fixed list
//! of recommendations. Only the output medium differs.

use super::status::{global_score, metric_rows, MetricRow, Status};
use super::RenderContext;
use crate::domain::QualitySummary;

pub const REPORT_TITLE: &str = "Rapport de Qualité des Données";
pub const SUMMARY_HEADING: &str = "Résumé des Performances";
pub const RECOMMENDATIONS_HEADING: &str = "Recommandations";
pub const TABLE_HEADERS: [&str; 3] = ["Métrique", "Valeur", "Statut"];
pub const FOOTER_LINES: [&str; 2] = [
    "Page 1 sur 1",
    "Document généré automatiquement - Data Quality Monitoring",
];

/// Fixed recommendations printed at the end of every document
pub const RECOMMENDATIONS: [&str; 5] = [
    "Traiter les anomalies critiques rapidement",
    "Améliorer la qualité des données saisies",
    "Mettre en place des contrôles automatiques",
    "Former les équipes aux bonnes pratiques",
    "Auditer régulièrement la base de données",
];

/// Medium-independent content of a document report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub title: &'static str,
    pub date_line: String,
    pub time_line: String,
    pub rows: Vec<MetricRow>,
    pub recommendations: Vec<&'static str>,
}

impl ReportLayout {
    /// Lay out `summary` for the given context
    ///
    /// The success rate is shown with one decimal and a composite score row is
    /// appended after the four shared metric rows.
    pub fn build(summary: &QualitySummary, ctx: &RenderContext) -> Self {
        let mut rows = metric_rows(summary);
        if let Some(rate_row) = rows.first_mut() {
            rate_row.value = format!("{:.1}%", summary.success_rate);
        }
        rows.push(MetricRow {
            name: "Score Global",
            value: format!("{:.1}/100", global_score(summary.success_rate)),
            status: Status::Composite,
        });

        Self {
            title: REPORT_TITLE,
            date_line: format!("Date : {}", ctx.display_date()),
            time_line: format!("Heure : {}", ctx.display_time()),
            rows,
            recommendations: RECOMMENDATIONS.to_vec(),
        }
    }
}
