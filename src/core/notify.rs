//! User-facing status notifications
//!
//! Every export call produces exactly one [`Notification`]. Messages are the
//! French strings shown by the dashboard; the dismissal interval is carried along
//! for the UI to enforce.

use crate::domain::{ExportFormat, ExportOutcome};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default auto-dismiss interval
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

/// A transient status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }

    pub fn with_dismiss_after(mut self, dismiss_after: Duration) -> Self {
        self.dismiss_after = dismiss_after;
        self
    }

    /// Notification for a call rejected because another export is running
    pub fn busy() -> Self {
        Self::new(Severity::Info, "Un export est déjà en cours")
    }

    /// Notification describing the outcome of one export
    ///
    /// Success and Degraded map to `Success` severity, Failure to `Error`.
    /// Degraded messages include the reason.
    pub fn for_outcome(format: ExportFormat, outcome: &ExportOutcome) -> Self {
        match (format, outcome) {
            (ExportFormat::Document, ExportOutcome::Success { .. }) => {
                Self::new(Severity::Success, "PDF généré avec succès !")
            }
            (ExportFormat::Spreadsheet, ExportOutcome::Success { .. }) => {
                Self::new(Severity::Success, "Fichier CSV téléchargé !")
            }
            (ExportFormat::FlatText, ExportOutcome::Success { .. }) => {
                Self::new(Severity::Success, "CSV téléchargé !")
            }
            (ExportFormat::Document, ExportOutcome::Degraded { reason, .. }) => Self::new(
                Severity::Success,
                format!("PDF ouvert pour impression (mode dégradé : {reason})"),
            ),
            (format, ExportOutcome::Degraded { reason, .. }) => Self::new(
                Severity::Success,
                format!("Export {} réalisé en mode dégradé : {reason}", format.label()),
            ),
            (ExportFormat::Document, ExportOutcome::Failure { reason }) => Self::new(
                Severity::Error,
                format!("Erreur PDF - Utilisez Excel ou CSV ({reason})"),
            ),
            (ExportFormat::Spreadsheet, ExportOutcome::Failure { reason }) => {
                Self::new(Severity::Error, format!("Erreur Excel ({reason})"))
            }
            (ExportFormat::FlatText, ExportOutcome::Failure { reason }) => {
                Self::new(Severity::Error, format!("Erreur CSV ({reason})"))
            }
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Receiver of user-facing notifications
///
/// Called synchronously from the orchestrator; implementations should not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => println!("ℹ️  {}", notification.message),
            Severity::Success => println!("✅ {}", notification.message),
            Severity::Error => eprintln!("❌ {}", notification.message),
        }
    }
}

/// Writes notifications to the log only
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let dismiss_ms = notification.dismiss_after.as_millis() as u64;
        match notification.severity {
            Severity::Info | Severity::Success => tracing::info!(
                severity = %notification.severity,
                dismiss_ms,
                "{}",
                notification.message
            ),
            Severity::Error => tracing::error!(
                severity = %notification.severity,
                dismiss_ms,
                "{}",
                notification.message
            ),
        }
    }
}

/// Forwards notifications to an async consumer (e.g. a UI task)
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("Notification receiver dropped");
        }
    }
}
