//! Domain models and types for Prism.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input records** ([`QualitySummary`], [`PartialSummary`])
//! - **Requests and outcomes** ([`ExportRequest`], [`ExportOutcome`])
//! - **Formats** ([`ExportFormat`])
//! - **Error types** ([`PrismError`], [`ExportError`], [`ExportRejected`])
//! - **Result type alias** ([`Result`])
//!
//! # Missing data
//!
//! Summaries arrive from the metrics API with every field optional. Resolution
//! substitutes fixed defaults rather than failing, so an export can always be
//! produced:
//!
//! ```rust
//! use prism::domain::QualitySummary;
//!
//! let (summary, substituted) = QualitySummary::resolve(None);
//! assert!(substituted);
//! assert_eq!(summary.total_checks, 100);
//! ```

pub mod errors;
pub mod format;
pub mod outcome;
pub mod request;
pub mod result;
pub mod summary;

pub use errors::{ExportError, ExportRejected, PrismError};
pub use format::ExportFormat;
pub use outcome::ExportOutcome;
pub use request::ExportRequest;
pub use result::Result;
pub use summary::{PartialSummary, QualitySummary};
