//! External system integrations for Prism.
//!
//! - [`metrics_api`] - summary provider backed by the metrics HTTP API
//! - [`delivery`] - download mechanism (filesystem)
//! - [`print`] - print pipeline (spool directory plus optional command)
//!
//! Each adapter is a trait plus one production implementation, so the export
//! engine can be exercised with in-memory doubles.

pub mod delivery;
pub mod metrics_api;
pub mod print;
