//! Metrics API response models

use crate::domain::PartialSummary;
use serde::{Deserialize, Serialize};

/// Response body of `GET /api/quality-summary`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryEnvelope {
    /// Whether the backend could compute a summary
    #[serde(default)]
    pub success: bool,

    /// Summary fields, snake_case, any of them possibly missing
    #[serde(default)]
    pub summary: Option<PartialSummary>,

    /// Backend error message when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryEnvelope {
    /// The usable summary, if any
    ///
    /// An unsuccessful envelope or an empty summary object yields `None`.
    pub fn into_summary(self) -> Option<PartialSummary> {
        if !self.success {
            return None;
        }
        self.summary.filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_envelope() {
        let json = r#"{
            "success": true,
            "summary": {
                "success_rate": 92.5,
                "passed_checks": 185,
                "failed_checks": 10,
                "warning_checks": 5,
                "total_checks": 200,
                "total_anomalies": 3,
                "new_anomalies": 1,
                "high_severity_anomalies": 0
            }
        }"#;

        let envelope: SummaryEnvelope = serde_json::from_str(json).unwrap();
        let summary = envelope.into_summary().unwrap();
        assert_eq!(summary.success_rate, Some(92.5));
        assert_eq!(summary.total_checks, Some(200));
        assert_eq!(summary.high_severity_anomalies, Some(0));
    }

    #[test]
    fn test_unsuccessful_envelope_has_no_summary() {
        let json = r#"{"success": false, "error": "database offline"}"#;
        let envelope: SummaryEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.as_deref(), Some("database offline"));
        assert!(envelope.into_summary().is_none());
    }

    #[test]
    fn test_empty_summary_object_is_none() {
        let envelope: SummaryEnvelope =
            serde_json::from_str(r#"{"success": true, "summary": {}}"#).unwrap();
        assert!(envelope.into_summary().is_none());
    }
}
