//! HTTP retrieval of member report pages.
//!
//! One GET per member, no retries; an unreachable or non-2xx source fails
//! that member's aggregation and the caller aborts the run.

use crate::config::FetchConfig;
use crate::error::ReportError;
use std::time::Duration;
use tracing::debug;

/// HTTP client for fetching report pages.
pub struct ReportClient {
    client: reqwest::Client,
}

impl ReportClient {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &FetchConfig) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch one report page and return its body text.
    ///
    /// Non-2xx responses are errors; decoding the body to text follows the
    /// response's charset.
    pub async fn fetch_report(&self, url: &str) -> Result<String, ReportError> {
        debug!("Fetching report page: {}", url);

        let response = self.client.get(url).send().await?;
        let body = response.error_for_status()?.text().await?;

        Ok(body)
    }
}
