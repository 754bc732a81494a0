//! Qualitative status policy
//!
//! Fixed business rules mapping summary values to the status column. The
//! document reports and the spreadsheet use different label sets; the rate
//! threshold is shared. Thresholds are not configurable.

use crate::domain::QualitySummary;
use std::fmt;

/// Success rate at or above which the rate is reported as excellent
pub const EXCELLENT_RATE_THRESHOLD: f64 = 80.0;

/// Status label of one report row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Excellent,
    Good,
    Moderate,
    Compliant,
    Perfect,
    Monitor,
    NoAnomaly,
    Present,
    Critical,
    Composite,
}

impl Status {
    /// Label as printed in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Bon",
            Self::Moderate => "Moyen",
            Self::Compliant => "Conforme",
            Self::Perfect => "Parfait",
            Self::Monitor => "À surveiller",
            Self::NoAnomaly => "Absence",
            Self::Present => "Présence",
            Self::Critical => "Critique",
            Self::Composite => "Composite",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn success_rate_status(rate: f64) -> Status {
    if rate >= EXCELLENT_RATE_THRESHOLD {
        Status::Excellent
    } else {
        Status::Moderate
    }
}

pub fn failed_checks_status(failed: u64) -> Status {
    if failed == 0 {
        Status::Perfect
    } else {
        Status::Monitor
    }
}

pub fn anomalies_status(anomalies: u64) -> Status {
    if anomalies == 0 {
        Status::NoAnomaly
    } else {
        Status::Critical
    }
}

/// Composite score out of 100 shown in the document reports
pub fn global_score(rate: f64) -> f64 {
    (rate / 100.0) * 50.0 + 50.0
}

/// Spreadsheet label for the success rate
pub fn spreadsheet_rate_status(rate: f64) -> Status {
    if rate >= EXCELLENT_RATE_THRESHOLD {
        Status::Excellent
    } else {
        Status::Good
    }
}

/// Spreadsheet label for active anomalies
pub fn spreadsheet_anomalies_status(anomalies: u64) -> Status {
    if anomalies == 0 {
        Status::NoAnomaly
    } else {
        Status::Present
    }
}

/// One metric row of a report
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub name: &'static str,
    pub value: String,
    pub status: Status,
}

/// The four metric rows of the document reports
///
/// Values use the shortest decimal representation (`92.5%`, `69%`).
pub fn metric_rows(summary: &QualitySummary) -> Vec<MetricRow> {
    vec![
        MetricRow {
            name: "Taux de Réussite",
            value: format!("{}%", summary.success_rate),
            status: success_rate_status(summary.success_rate),
        },
        MetricRow {
            name: "Contrôles Validés",
            value: summary.passed_checks.to_string(),
            status: Status::Compliant,
        },
        MetricRow {
            name: "Contrôles en Échec",
            value: summary.failed_checks.to_string(),
            status: failed_checks_status(summary.failed_checks),
        },
        MetricRow {
            name: "Anomalies Actives",
            value: summary.total_anomalies.to_string(),
            status: anomalies_status(summary.total_anomalies),
        },
    ]
}

/// The four metric rows of the spreadsheet
///
/// Same values as [`metric_rows`]. Failed checks are always flagged for
/// monitoring and anomalies are reported as present or absent.
pub fn spreadsheet_rows(summary: &QualitySummary) -> Vec<MetricRow> {
    let statuses = [
        spreadsheet_rate_status(summary.success_rate),
        Status::Compliant,
        Status::Monitor,
        spreadsheet_anomalies_status(summary.total_anomalies),
    ];
    metric_rows(summary)
        .into_iter()
        .zip(statuses)
        .map(|(row, status)| MetricRow { status, ..row })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(100.0 => Status::Excellent ; "perfect rate")]
    #[test_case(80.0 => Status::Excellent ; "threshold is inclusive")]
    #[test_case(79.99 => Status::Moderate ; "just below threshold")]
    #[test_case(0.0 => Status::Moderate ; "zero rate")]
    fn test_success_rate_status(rate: f64) -> Status {
        success_rate_status(rate)
    }

    #[test_case(0 => Status::Perfect)]
    #[test_case(1 => Status::Monitor)]
    fn test_failed_checks_status(failed: u64) -> Status {
        failed_checks_status(failed)
    }

    #[test_case(0 => Status::NoAnomaly)]
    #[test_case(50 => Status::Critical)]
    fn test_anomalies_status(anomalies: u64) -> Status {
        anomalies_status(anomalies)
    }

    #[test]
    fn test_global_score() {
        assert_eq!(global_score(100.0), 100.0);
        assert_eq!(global_score(0.0), 50.0);
        assert_eq!(global_score(69.0), 84.5);
    }

    #[test]
    fn test_metric_rows_value_formatting() {
        let summary = QualitySummary {
            success_rate: 92.5,
            passed_checks: 185,
            failed_checks: 10,
            warning_checks: 5,
            total_checks: 200,
            total_anomalies: 3,
            new_anomalies: None,
            high_severity_anomalies: None,
        };

        let rows = metric_rows(&summary);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].value, "92.5%");
        assert_eq!(rows[0].status, Status::Excellent);
        assert_eq!(rows[2].status, Status::Monitor);
        assert_eq!(rows[3].status, Status::Critical);

        let defaults = metric_rows(&QualitySummary::fallback_defaults());
        assert_eq!(defaults[0].value, "69%");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Monitor.to_string(), "À surveiller");
        assert_eq!(Status::Moderate.label(), "Moyen");
        assert_eq!(Status::Good.label(), "Bon");
        assert_eq!(Status::Present.label(), "Présence");
    }

    #[test_case(92.5 => Status::Excellent ; "above threshold")]
    #[test_case(70.0 => Status::Good ; "below threshold")]
    fn test_spreadsheet_rate_status(rate: f64) -> Status {
        spreadsheet_rate_status(rate)
    }

    #[test]
    fn test_spreadsheet_rows_use_spreadsheet_labels() {
        let summary = QualitySummary {
            success_rate: 70.0,
            passed_checks: 70,
            failed_checks: 0,
            warning_checks: 0,
            total_checks: 70,
            total_anomalies: 4,
            new_anomalies: None,
            high_severity_anomalies: None,
        };

        let statuses: Vec<Status> = spreadsheet_rows(&summary).iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![Status::Good, Status::Compliant, Status::Monitor, Status::Present]
        );

        let document: Vec<Status> = metric_rows(&summary).iter().map(|r| r.status).collect();
        assert_eq!(
            document,
            vec![Status::Moderate, Status::Compliant, Status::Perfect, Status::Critical]
        );
    }
}
