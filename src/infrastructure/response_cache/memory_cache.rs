//! In-memory LRU response cache.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::ImageKey;
use crate::domain::errors::CacheResult;
use crate::domain::ports::{ResponseCachePort, ResponseStorePort};

/// Default maximum number of responses kept in memory.
pub const DEFAULT_CACHE_ENTRIES: usize = 100;

/// In-memory LRU cache of raw response bodies.
/// Thread-safe; lookups are synchronous.
pub struct MemoryResponseCache {
    cache: Mutex<LruCache<ImageKey, Bytes>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryResponseCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// Number of stored responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MemoryResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryResponseCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached responses.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} responses, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

impl ResponseCachePort for MemoryResponseCache {
    fn cached_response(&self, key: &ImageKey) -> Option<Bytes> {
        let mut cache = self.cache.lock();
        if let Some(body) = cache.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Memory response cache hit");
            Some(body.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Memory response cache miss");
            None
        }
    }
}

#[async_trait]
impl ResponseStorePort for MemoryResponseCache {
    async fn store(&self, key: &ImageKey, body: &Bytes) -> CacheResult<()> {
        debug!(key = %key, size = body.len(), "Storing response in memory cache");
        self.cache.lock().put(key.clone(), body.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> ImageKey {
        ImageKey::parse(&format!("https://example.com/{name}.png")).unwrap()
    }

    #[tokio::test]
    async fn test_store_and_lookup() {
        let cache = MemoryResponseCache::new(10);
        let body = Bytes::from_static(b"payload");
        assert!(cache.is_empty());

        cache.store(&key("a"), &body).await.unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.cached_response(&key("a")), Some(body));
    }

    #[test]
    fn test_lookup_miss() {
        let cache = MemoryResponseCache::new(10);
        assert!(cache.cached_response(&key("missing")).is_none());
    }

    #[tokio::test]
    async fn test_least_recently_used_is_dropped() {
        let cache = MemoryResponseCache::new(2);
        let body = Bytes::from_static(b"x");

        cache.store(&key("1"), &body).await.unwrap();
        cache.store(&key("2"), &body).await.unwrap();
        cache.store(&key("3"), &body).await.unwrap();

        assert!(cache.cached_response(&key("1")).is_none());
        assert!(cache.cached_response(&key("2")).is_some());
        assert!(cache.cached_response(&key("3")).is_some());
    }

    #[tokio::test]
    async fn test_stats() {
        let cache = MemoryResponseCache::new(10);
        cache
            .store(&key("a"), &Bytes::from_static(b"x"))
            .await
            .unwrap();

        let _ = cache.cached_response(&key("a"));
        let _ = cache.cached_response(&key("missing"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate - 50.0).abs() < f64::EPSILON);
    }
}
