//! Export engine
//!
//! - [`coordinator`] walks the renderer chain of a format
//! - [`orchestrator`] enforces one export at a time and emits notifications
//! - [`state`] holds the observable busy/idle state
//! - [`factory`] wires the default chains from configuration

pub mod coordinator;
pub mod factory;
pub mod orchestrator;
pub mod state;

pub use coordinator::{ChainOutcome, FallbackCoordinator};
pub use factory::{create_orchestrator, default_coordinator};
pub use orchestrator::{ExportOrchestrator, OrchestratorOptions};
pub use state::{ExportPermit, ExportState, ExportStateCell};
