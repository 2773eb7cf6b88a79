//! Raw feed source abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Supplies the raw text of the NAV feed. Implementations own their own
/// transport, timeouts and retries; parsing happens elsewhere.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self) -> Result<String>;
}
