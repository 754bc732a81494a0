//! Export outcomes

use super::errors::ExportError;
use std::fmt;

/// Result of one export request
///
/// Exactly one outcome is produced per request and handed to the notification
/// sink; it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The primary renderer produced the artifact
    Success { filename: String },

    /// A fallback renderer produced the artifact after the primary failed
    Degraded {
        filename: String,
        reason: ExportError,
    },

    /// No artifact could be produced or delivered
    Failure { reason: ExportError },
}

impl ExportOutcome {
    /// True for `Success` and `Degraded`
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Name of the produced artifact, if any
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Success { filename } | Self::Degraded { filename, .. } => Some(filename),
            Self::Failure { .. } => None,
        }
    }

    /// Failure or degradation reason, if any
    pub fn reason(&self) -> Option<&ExportError> {
        match self {
            Self::Success { .. } => None,
            Self::Degraded { reason, .. } | Self::Failure { reason } => Some(reason),
        }
    }

    /// Short label used in log fields
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Degraded { .. } => "degraded",
            Self::Failure { .. } => "failure",
        }
    }
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { filename } => write!(f, "exported {filename}"),
            Self::Degraded { filename, reason } => {
                write!(f, "exported {filename} in degraded mode ({reason})")
            }
            Self::Failure { reason } => write!(f, "export failed ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let success = ExportOutcome::Success {
            filename: "a.csv".to_string(),
        };
        assert!(success.is_success());
        assert!(!success.is_degraded());
        assert_eq!(success.filename(), Some("a.csv"));
        assert!(success.reason().is_none());

        let degraded = ExportOutcome::Degraded {
            filename: "a.pdf".to_string(),
            reason: ExportError::CapabilityLoad("missing".to_string()),
        };
        assert!(degraded.is_success());
        assert!(degraded.is_degraded());
        assert_eq!(degraded.label(), "degraded");

        let failure = ExportOutcome::Failure {
            reason: ExportError::Render("boom".to_string()),
        };
        assert!(!failure.is_success());
        assert!(failure.filename().is_none());
    }

    #[test]
    fn test_outcome_display() {
        let degraded = ExportOutcome::Degraded {
            filename: "r.pdf".to_string(),
            reason: ExportError::CapabilityLoad("timeout".to_string()),
        };
        assert_eq!(
            degraded.to_string(),
            "exported r.pdf in degraded mode (document engine unavailable: timeout)"
        );
    }
}
