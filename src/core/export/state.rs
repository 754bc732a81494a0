//! Export state machine
//!
//! `Idle -> InProgress(format) -> Idle`. The only way into `InProgress` is
//! [`ExportStateCell::try_acquire`], and the returned [`ExportPermit`] puts the
//! state back to `Idle` when dropped, whatever path the export took.

use crate::domain::ExportFormat;
use std::fmt;
use tokio::sync::watch;

/// Observable orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    InProgress(ExportFormat),
}

impl ExportState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::InProgress(format) => write!(f, "exporting {format}"),
        }
    }
}

/// Shared holder of the [`ExportState`]
#[derive(Debug)]
pub struct ExportStateCell {
    tx: watch::Sender<ExportState>,
}

impl ExportStateCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ExportState::Idle);
        Self { tx }
    }

    pub fn current(&self) -> ExportState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ExportState> {
        self.tx.subscribe()
    }

    /// Move from `Idle` to `InProgress(format)` atomically
    ///
    /// Returns `None` if an export is already in progress.
    pub fn try_acquire(&self, format: ExportFormat) -> Option<ExportPermit<'_>> {
        let acquired = self.tx.send_if_modified(|state| {
            if state.is_idle() {
                *state = ExportState::InProgress(format);
                true
            } else {
                false
            }
        });

        acquired.then_some(ExportPermit { cell: self, format })
    }
}

impl Default for ExportStateCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that the holder owns the in-progress slot
#[derive(Debug)]
pub struct ExportPermit<'a> {
    cell: &'a ExportStateCell,
    format: ExportFormat,
}

impl ExportPermit<'_> {
    pub fn format(&self) -> ExportFormat {
        self.format
    }
}

impl Drop for ExportPermit<'_> {
    fn drop(&mut self) {
        self.cell.tx.send_replace(ExportState::Idle);
    }
}
