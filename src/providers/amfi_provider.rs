use crate::core::FeedSource;
use crate::core::config::AmfiProviderConfig;
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Downloads the full `NAVAll.txt` feed published by AMFI.
pub struct AmfiFeedProvider {
    feed_url: String,
    retries: usize,
    client: reqwest::Client,
}

impl AmfiFeedProvider {
    pub fn new(config: &AmfiProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("navdex/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(AmfiFeedProvider {
            feed_url: config.feed_url.clone(),
            retries: config.retries,
            client,
        })
    }
}

#[async_trait]
impl FeedSource for AmfiFeedProvider {
    async fn fetch_feed(&self) -> Result<String> {
        let url = &self.feed_url;
        let client = &self.client;
        debug!("Requesting NAV feed from {}", url);

        let response = with_retry(
            || async {
                client
                    .get(url)
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
            },
            self.retries,
            RETRY_DELAY,
        )
        .await
        .with_context(|| format!("Failed to send request for NAV feed: {url}"))?;

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for NAV feed: {url}"))?;

        if response_text.trim().is_empty() {
            return Err(anyhow!("Received empty NAV feed from {}", url));
        }

        debug!(
            "Fetched NAV feed from {} ({} bytes)",
            url,
            response_text.len()
        );
        Ok(response_text)
    }
}
