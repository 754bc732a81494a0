//! Metrics API adapter
//!
//! The metrics API is the summary provider of the dashboard. It exposes the
//! current quality summary inside a `{ success, summary }` envelope.

pub mod client;
pub mod models;

pub use client::MetricsApiClient;
pub use models::SummaryEnvelope;

use crate::domain::{PartialSummary, Result};
use async_trait::async_trait;

/// Source of quality summaries
///
/// `Ok(None)` means the provider answered but had no data; the orchestrator then
/// substitutes the default record.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn fetch_summary(&self) -> Result<Option<PartialSummary>>;
}
