use crate::core::FeedSource;
use crate::feed::parse_feed;
use crate::store::FundStore;
use crate::store::snapshot::Snapshot;
use anyhow::{Context, Result, anyhow};
use chrono::{Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Keeps the [`FundStore`] fresh by refetching the feed from a
/// [`FeedSource`] once the installed snapshot is older than the refresh
/// interval.
pub struct NavService {
    source: Arc<dyn FeedSource>,
    store: FundStore,
    refresh_interval: Duration,
    /// Held while refreshing; stores why the latest attempt failed, if it did.
    refresh_gate: Mutex<Option<String>>,
    refresh_attempts: AtomicU64,
}

const FETCH_FAILED: &str = "Failed to fetch data from AMFI";

impl NavService {
    pub fn new(source: Arc<dyn FeedSource>, refresh_interval: Duration) -> Self {
        NavService {
            source,
            store: FundStore::new(),
            refresh_interval,
            refresh_gate: Mutex::new(None),
            refresh_attempts: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &FundStore {
        &self.store
    }

    /// Fetches and parses the feed unconditionally, replacing the snapshot.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        info!("Refreshing NAV feed");
        let raw = self
            .source
            .fetch_feed()
            .await
            .context(FETCH_FAILED)?;
        let parsed = parse_feed(&raw);
        Ok(self.store.replace(parsed))
    }

    /// Returns a snapshot no older than the refresh interval, refreshing
    /// first when needed.
    ///
    /// Concurrent callers that find the snapshot stale wait on one refresh
    /// instead of each fetching the feed. Callers that waited on an attempt
    /// which failed reuse that failure rather than fetching again. When a
    /// refresh fails but an older snapshot exists, that snapshot is served.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>> {
        let current = self.store.snapshot();
        if !self.needs_refresh(&current) {
            return Ok(current);
        }

        let attempts_seen = self.refresh_attempts.load(Ordering::Acquire);
        let mut last_failure = self.refresh_gate.lock().await;
        let current = self.store.snapshot();
        if !self.needs_refresh(&current) {
            debug!(
                version = current.version(),
                "Snapshot refreshed while waiting"
            );
            return Ok(current);
        }

        if self.refresh_attempts.load(Ordering::Acquire) != attempts_seen {
            if let Some(reason) = last_failure.as_deref() {
                debug!(reason, "Refresh failed while waiting, not retrying");
                let error = anyhow!(reason.to_string()).context(FETCH_FAILED);
                return Self::fallback(current, error);
            }
        }

        let outcome = self.refresh().await;
        *last_failure = outcome.as_ref().err().map(|e| e.root_cause().to_string());
        self.refresh_attempts.fetch_add(1, Ordering::Release);

        match outcome {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => Self::fallback(current, e),
        }
    }

    fn fallback(current: Arc<Snapshot>, error: anyhow::Error) -> Result<Arc<Snapshot>> {
        if current.is_empty() {
            return Err(error);
        }
        warn!(
            error = %error,
            version = current.version(),
            "Refresh failed, serving stale snapshot"
        );
        Ok(current)
    }

    fn needs_refresh(&self, snapshot: &Snapshot) -> bool {
        snapshot.is_empty() || snapshot.is_stale(self.refresh_interval, Utc::now())
    }
}
