//! HTTP client for the metrics API

use super::models::SummaryEnvelope;
use super::SummaryProvider;
use crate::config::ApiConfig;
use crate::domain::{PartialSummary, PrismError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Metrics API client
///
/// Fetches the quality summary with a single `GET`. There is no retry: a failed
/// fetch is reported to the caller, who decides whether to export with defaults.
///
/// # Example
///
/// ```no_run
/// use prism::adapters::metrics_api::{MetricsApiClient, SummaryProvider};
/// use prism::config::ApiConfig;
///
/// # async fn example() -> prism::domain::Result<()> {
/// let client = MetricsApiClient::new(&ApiConfig::default())?;
/// let summary = client.fetch_summary().await?;
/// println!("{summary:?}");
/// # Ok(())
/// # }
/// ```
pub struct MetricsApiClient {
    client: Client,
    summary_url: String,
}

impl MetricsApiClient {
    /// Build a client from the `[api]` configuration section
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)))
            .build()
            .map_err(|e| PrismError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let summary_url = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            config.summary_path
        );

        Ok(Self {
            client,
            summary_url,
        })
    }

    /// Full URL of the summary endpoint
    pub fn summary_url(&self) -> &str {
        &self.summary_url
    }
}

#[async_trait]
impl SummaryProvider for MetricsApiClient {
    async fn fetch_summary(&self) -> Result<Option<PartialSummary>> {
        tracing::debug!(url = %self.summary_url, "Fetching quality summary");

        let resp = self
            .client
            .get(&self.summary_url)
            .send()
            .await
            .map_err(|e| PrismError::SummaryProvider(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(PrismError::SummaryProvider(format!(
                "summary request failed with status {status}: {body}"
            )));
        }

        let envelope = resp.json::<SummaryEnvelope>().await.map_err(|e| {
            PrismError::SummaryProvider(format!("invalid summary response: {e}"))
        })?;

        if !envelope.success {
            tracing::warn!(
                url = %self.summary_url,
                error = envelope.error.as_deref().unwrap_or("unknown"),
                "Metrics API reported no summary"
            );
        }

        Ok(envelope.into_summary())
    }
}
