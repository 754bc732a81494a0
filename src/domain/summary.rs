//! Quality summary records
//!
//! [`QualitySummary`] is the read-only input of every renderer. The metrics API
//! delivers it as a [`PartialSummary`] where any field may be missing; the export
//! engine resolves that into a complete record by substituting fixed defaults.

use serde::{Deserialize, Serialize};

/// Default success rate used when the summary is absent or incomplete
pub const DEFAULT_SUCCESS_RATE: f64 = 69.0;
/// Default passed checks
pub const DEFAULT_PASSED_CHECKS: u64 = 69;
/// Default failed checks
pub const DEFAULT_FAILED_CHECKS: u64 = 31;
/// Default warning checks
pub const DEFAULT_WARNING_CHECKS: u64 = 0;
/// Default total checks
pub const DEFAULT_TOTAL_CHECKS: u64 = 100;
/// Default active anomalies
pub const DEFAULT_TOTAL_ANOMALIES: u64 = 50;

/// Complete quality summary consumed by the renderers
///
/// `passed_checks + failed_checks + warning_checks <= total_checks` is expected
/// but not enforced; inconsistent values are rendered as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    /// Percentage of passing checks, in `[0, 100]`
    pub success_rate: f64,

    /// Number of passing checks
    pub passed_checks: u64,

    /// Number of failing checks
    pub failed_checks: u64,

    /// Number of checks in warning state
    pub warning_checks: u64,

    /// Total number of checks
    pub total_checks: u64,

    /// Number of active anomalies
    pub total_anomalies: u64,

    /// Anomalies not yet triaged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_anomalies: Option<u64>,

    /// Anomalies flagged with high severity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_severity_anomalies: Option<u64>,
}

impl QualitySummary {
    /// The fixed record substituted when no summary is available
    pub fn fallback_defaults() -> Self {
        Self {
            success_rate: DEFAULT_SUCCESS_RATE,
            passed_checks: DEFAULT_PASSED_CHECKS,
            failed_checks: DEFAULT_FAILED_CHECKS,
            warning_checks: DEFAULT_WARNING_CHECKS,
            total_checks: DEFAULT_TOTAL_CHECKS,
            total_anomalies: DEFAULT_TOTAL_ANOMALIES,
            new_anomalies: None,
            high_severity_anomalies: None,
        }
    }

    /// Resolve an optional, possibly incomplete summary into a complete one
    ///
    /// Returns the resolved summary and whether any default was substituted.
    pub fn resolve(partial: Option<&PartialSummary>) -> (Self, bool) {
        match partial {
            None => (Self::fallback_defaults(), true),
            Some(partial) => {
                let substituted = !partial.is_complete();
                (partial.complete_with_defaults(), substituted)
            }
        }
    }
}

impl From<QualitySummary> for PartialSummary {
    fn from(summary: QualitySummary) -> Self {
        Self {
            success_rate: Some(summary.success_rate),
            passed_checks: Some(summary.passed_checks),
            failed_checks: Some(summary.failed_checks),
            warning_checks: Some(summary.warning_checks),
            total_checks: Some(summary.total_checks),
            total_anomalies: Some(summary.total_anomalies),
            new_anomalies: summary.new_anomalies,
            high_severity_anomalies: summary.high_severity_anomalies,
        }
    }
}

/// Summary as received from the metrics API, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSummary {
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub passed_checks: Option<u64>,
    #[serde(default)]
    pub failed_checks: Option<u64>,
    #[serde(default)]
    pub warning_checks: Option<u64>,
    #[serde(default)]
    pub total_checks: Option<u64>,
    #[serde(default)]
    pub total_anomalies: Option<u64>,
    #[serde(default)]
    pub new_anomalies: Option<u64>,
    #[serde(default)]
    pub high_severity_anomalies: Option<u64>,
}

impl PartialSummary {
    /// True when no field carries a value (the API sends `{}` when it has no metrics)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when every rendered field is present
    pub fn is_complete(&self) -> bool {
        self.success_rate.is_some()
            && self.passed_checks.is_some()
            && self.failed_checks.is_some()
            && self.warning_checks.is_some()
            && self.total_checks.is_some()
            && self.total_anomalies.is_some()
    }

    /// Fill missing fields from [`QualitySummary::fallback_defaults`]
    pub fn complete_with_defaults(&self) -> QualitySummary {
        QualitySummary {
            success_rate: self.success_rate.unwrap_or(DEFAULT_SUCCESS_RATE),
            passed_checks: self.passed_checks.unwrap_or(DEFAULT_PASSED_CHECKS),
            failed_checks: self.failed_checks.unwrap_or(DEFAULT_FAILED_CHECKS),
            warning_checks: self.warning_checks.unwrap_or(DEFAULT_WARNING_CHECKS),
            total_checks: self.total_checks.unwrap_or(DEFAULT_TOTAL_CHECKS),
            total_anomalies: self.total_anomalies.unwrap_or(DEFAULT_TOTAL_ANOMALIES),
            new_anomalies: self.new_anomalies,
            high_severity_anomalies: self.high_severity_anomalies,
        }
    }
}
