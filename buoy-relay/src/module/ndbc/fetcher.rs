//! NDBC feed fetcher
//!
//! One blocking-style GET of the latest-observations table per run.
//! No retries; cron provides the next attempt.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, warn};

/// Owns the HTTP client and the feed URL for the lifetime of a run.
pub struct FeedFetcher {
    client: Client,
    url: String,
}

impl FeedFetcher {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .user_agent(concat!("buoy-relay/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to build reqwest client"),
            url: url.to_string(),
        }
    }

    /// Fetch the feed and return its raw lines, header rows included.
    ///
    /// A non-success HTTP status yields an empty list; the caller treats
    /// that as nothing to relay, not a fatal error. Transport failures
    /// (DNS, refused, timeout) do propagate.
    pub async fn fetch_lines(&self) -> Result<Vec<String>> {
        info!("Fetching latest buoy data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to GET NDBC latest observations")?;

        if !response.status().is_success() {
            warn!(
                "NDBC feed returned HTTP {}, nothing to relay",
                response.status()
            );
            return Ok(Vec::new());
        }

        let body = response
            .text()
            .await
            .context("Failed to read NDBC response body")?;

        Ok(body.lines().map(str::to_string).collect())
    }
}
