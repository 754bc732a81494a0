//! Core business logic for Prism.
//!
//! # Modules
//!
//! - [`render`] - Format renderers, the status policy and the PDF writer
//! - [`export`] - Fallback coordination, the orchestrator and its state
//! - [`notify`] - User-facing notifications and their sinks
//!
//! # Export Workflow
//!
//! 1. **Acquire**: the orchestrator moves from idle to in-progress, or rejects
//! 2. **Resolve**: the request summary is completed with defaults
//! 3. **Render**: the coordinator walks the format's renderer chain
//! 4. **Deliver**: downloadable artifacts go to the download sink
//! 5. **Notify**: one notification describes the outcome
//!
//! # Example
//!
//! ```rust,no_run
//! use prism::config::PrismConfig;
//! use prism::core::export::create_orchestrator;
//! use prism::core::notify::ConsoleNotifier;
//! use prism::domain::{ExportFormat, ExportRequest};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let orchestrator = create_orchestrator(&PrismConfig::default(), Arc::new(ConsoleNotifier));
//!
//! let request = ExportRequest::new(ExportFormat::Spreadsheet);
//! match orchestrator.export(&request).await {
//!     Ok(outcome) => println!("{outcome}"),
//!     Err(rejected) => println!("{rejected}"),
//! }
//! # }
//! ```

pub mod export;
pub mod notify;
pub mod render;
