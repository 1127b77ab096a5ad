//! Process-wide memo of the last completed fetch

use expo_common::{ArticleWarning, ExpoError, Timestamp};
use expo_graphs::AttendanceTable;
use moka::future::Cache;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// One completed fetch, as shown on the page
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub table: AttendanceTable,
    pub warnings: Vec<ArticleWarning>,
    /// Article links found on the search page
    pub articles: usize,
    pub fetched_at: Timestamp,
}

/// The single dataset the dashboard shows
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct DatasetKey;

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expo_attendance")
    }
}

/// Memoized snapshot with no expiry; only an explicit invalidation drops it.
///
/// Concurrent callers on a cold cache share one in-flight fetch.
pub struct DatasetCache {
    cache: Cache<DatasetKey, Arc<Snapshot>>,
    fetches: AtomicU64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().max_capacity(1).build(),
            fetches: AtomicU64::new(0),
        }
    }

    /// Cached snapshot, or the result of running `fetch` once
    #[instrument(skip_all, fields(key = %DatasetKey))]
    pub async fn get_or_fetch<F>(&self, fetch: F) -> Result<Arc<Snapshot>, Arc<ExpoError>>
    where
        F: Future<Output = Result<Snapshot, ExpoError>>,
    {
        self.cache
            .try_get_with(DatasetKey, async {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss, fetching");
                fetch.await.map(Arc::new)
            })
            .await
    }

    /// Cached snapshot without fetching
    pub async fn peek(&self) -> Option<Arc<Snapshot>> {
        self.cache.get(&DatasetKey).await
    }

    /// Drop the snapshot so the next read fetches again
    pub async fn invalidate(&self) {
        info!("Invalidating cached dataset");
        self.cache.invalidate(&DatasetKey).await;
    }

    /// Number of fetches started since creation
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(articles: usize) -> Snapshot {
        Snapshot {
            table: AttendanceTable::default(),
            warnings: Vec::new(),
            articles,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_cold_cache_is_empty() {
        let cache = DatasetCache::default();
        assert!(tokio_test::block_on(cache.peek()).is_none());
        assert_eq!(cache.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_second_read_uses_cache() {
        let cache = DatasetCache::new();

        let first = cache.get_or_fetch(async { Ok(snapshot(1)) }).await.unwrap();
        let second = cache.get_or_fetch(async { Ok(snapshot(2)) }).await.unwrap();

        assert_eq!(first.articles, 1);
        assert_eq!(second.articles, 1);
        assert_eq!(cache.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = DatasetCache::new();
        cache.get_or_fetch(async { Ok(snapshot(1)) }).await.unwrap();

        cache.invalidate().await;
        assert!(cache.peek().await.is_none());

        let refreshed = cache.get_or_fetch(async { Ok(snapshot(2)) }).await.unwrap();
        assert_eq!(refreshed.articles, 2);
        assert_eq!(cache.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = DatasetCache::new();

        let err = cache
            .get_or_fetch(async { Err(ExpoError::network("search unreachable")) })
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert!(cache.peek().await.is_none());

        let ok = cache.get_or_fetch(async { Ok(snapshot(3)) }).await.unwrap();
        assert_eq!(ok.articles, 3);
    }
}
