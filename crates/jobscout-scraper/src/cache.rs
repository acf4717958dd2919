//! Per-keyword TTL cache for search-phase results.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use jobscout_core::ListingSummary;

/// Source of the current time. Injected so tests can move time by hand.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    listings: Vec<ListingSummary>,
}

/// Keyword → listings cache with a fixed time-to-live.
///
/// An entry is fresh while `now - fetched_at < ttl`. Only non-empty results
/// are stored, so a keyword that came back empty (blocked, parse failure,
/// or genuinely no offers) is fetched again next time.
pub struct ListingCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ListingCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Builds a cache from a TTL in seconds.
    #[must_use]
    pub fn from_ttl_secs(ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self::new(Duration::try_seconds(secs).unwrap_or(Duration::MAX))
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached listings for `keyword` if fresh, otherwise awaits
    /// `fetch` and caches its result when non-empty.
    ///
    /// The lock is not held while `fetch` runs. Two concurrent misses for the
    /// same keyword both fetch; the later write wins.
    pub async fn get_or_fetch<F, Fut>(&self, keyword: &str, fetch: F) -> Vec<ListingSummary>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<ListingSummary>>,
    {
        if let Some(hit) = self.get_fresh(keyword).await {
            tracing::info!(keyword, count = hit.len(), "cache hit");
            return hit;
        }

        let listings = fetch().await;
        if listings.is_empty() {
            tracing::debug!(keyword, "empty result not cached");
        } else {
            self.entries.write().await.insert(
                keyword.to_owned(),
                CacheEntry {
                    fetched_at: self.clock.now(),
                    listings: listings.clone(),
                },
            );
        }
        listings
    }

    async fn get_fresh(&self, keyword: &str) -> Option<Vec<ListingSummary>> {
        let entries = self.entries.read().await;
        let entry = entries.get(keyword)?;
        let age = self.clock.now() - entry.fetched_at;
        (age < self.ttl).then(|| entry.listings.clone())
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl std::fmt::Debug for ListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
