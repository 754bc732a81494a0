//! Export orchestrator
//!
//! Entry point of the export engine. One call to [`ExportOrchestrator::export`]
//! yields exactly one outcome and one notification. The busy state is
//! released on every exit path, and is already Idle when the notification
//! is delivered.

use super::coordinator::{panic_message, FallbackCoordinator};
use super::state::{ExportState, ExportStateCell};
use crate::adapters::delivery::DownloadSink;
use crate::core::notify::{Notification, NotificationSink, DEFAULT_DISMISS_AFTER};
use crate::core::render::{Disposition, RenderContext};
use crate::domain::{ExportError, ExportOutcome, ExportRejected, ExportRequest, QualitySummary};
use crate::{log_export_outcome, log_export_start};
use chrono::{Local, NaiveDateTime};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Source of the generation timestamp
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Behaviour switches of the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Fail instead of substituting defaults when a request has no summary
    pub strict_summary: bool,

    /// Auto-dismiss interval attached to every notification
    pub dismiss_after: Duration,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            strict_summary: false,
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }
}

/// Runs exports one at a time
pub struct ExportOrchestrator {
    coordinator: FallbackCoordinator,
    downloads: Arc<dyn DownloadSink>,
    notifier: Arc<dyn NotificationSink>,
    state: ExportStateCell,
    options: OrchestratorOptions,
    clock: Clock,
}

impl ExportOrchestrator {
    pub fn new(
        coordinator: FallbackCoordinator,
        downloads: Arc<dyn DownloadSink>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            coordinator,
            downloads,
            notifier,
            state: ExportStateCell::new(),
            options: OrchestratorOptions::default(),
            clock: Arc::new(|| Local::now().naive_local()),
        }
    }

    pub fn with_options(mut self, options: OrchestratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the local-time clock (used for deterministic file names in tests)
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Current state
    pub fn state(&self) -> ExportState {
        self.state.current()
    }

    /// Receiver that observes every state transition
    pub fn subscribe_state(&self) -> watch::Receiver<ExportState> {
        self.state.subscribe()
    }

    pub fn coordinator(&self) -> &FallbackCoordinator {
        &self.coordinator
    }

    /// Run one export
    ///
    /// # Errors
    ///
    /// Returns [`ExportRejected`] if another export is in progress. The caller
    /// has then already been notified; nothing is queued.
    pub async fn export(&self, request: &ExportRequest) -> Result<ExportOutcome, ExportRejected> {
        let format = request.format();
        let Some(permit) = self.state.try_acquire(format) else {
            tracing::info!(
                request_id = %request.id(),
                format = %format,
                "Export rejected, another export is in progress"
            );
            self.notify(Notification::busy());
            return Err(ExportRejected);
        };

        log_export_start!(request.id(), format);
        let started = Instant::now();

        let outcome = AssertUnwindSafe(self.run(request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| ExportOutcome::Failure {
                reason: ExportError::Unexpected(format!(
                    "export panicked: {}",
                    panic_message(payload.as_ref())
                )),
            });

        log_export_outcome!(request.id(), format, &outcome, started.elapsed());
        drop(permit);
        self.notify(Notification::for_outcome(format, &outcome));

        Ok(outcome)
    }

    async fn run(&self, request: &ExportRequest) -> ExportOutcome {
        let format = request.format();

        if request.summary().is_none() && self.options.strict_summary {
            return ExportOutcome::Failure {
                reason: ExportError::Unexpected("no data available".to_string()),
            };
        }

        let (summary, substituted) = QualitySummary::resolve(request.summary());
        if substituted {
            tracing::warn!(
                request_id = %request.id(),
                present = request.summary().is_some(),
                "Summary missing or incomplete, default values substituted"
            );
        }

        let ctx = RenderContext::new(request.filename_base(), (self.clock)());
        let chain = self.coordinator.run(format, &summary, &ctx).await;

        if let Some(artifact) = chain.artifact() {
            if artifact.disposition == Disposition::Download {
                match self.downloads.deliver(artifact).await {
                    Ok(receipt) => tracing::info!(
                        request_id = %request.id(),
                        path = %receipt.path.display(),
                        bytes = receipt.bytes,
                        sha256 = %receipt.sha256,
                        "Artifact delivered"
                    ),
                    Err(e) => {
                        tracing::error!(
                            request_id = %request.id(),
                            filename = %artifact.filename,
                            error = %e,
                            "Artifact delivery failed"
                        );
                        return ExportOutcome::Failure {
                            reason: ExportError::Delivery(e.to_string()),
                        };
                    }
                }
            }
        }

        chain.to_outcome()
    }

    fn notify(&self, notification: Notification) {
        self.notifier
            .notify(notification.with_dismiss_after(self.options.dismiss_after));
    }
}
