//! Port definitions for the HTTP response cache.
//!
//! The loader only ever reads through `ResponseCachePort`. Writing is the
//! job of the HTTP layer (see `ResponseStorePort`).

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::ImageKey;
use crate::domain::errors::CacheResult;

/// Read-only lookup of previously stored response bodies.
pub trait ResponseCachePort: Send + Sync {
    /// Returns the stored body for `key`, if any.
    fn cached_response(&self, key: &ImageKey) -> Option<Bytes>;
}

/// A response cache that can also be written to.
#[async_trait]
pub trait ResponseStorePort: ResponseCachePort {
    /// Stores the body for `key`, replacing any previous entry.
    async fn store(&self, key: &ImageKey, body: &Bytes) -> CacheResult<()>;
}

/// Response cache that never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResponseCache;

impl ResponseCachePort for NoResponseCache {
    fn cached_response(&self, _key: &ImageKey) -> Option<Bytes> {
        None
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    /// Pre-populated response cache for testing.
    pub struct StubResponseCache {
        entries: Mutex<HashMap<String, Bytes>>,
        lookups: AtomicUsize,
    }

    impl StubResponseCache {
        /// Creates an empty cache.
        pub fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                lookups: AtomicUsize::new(0),
            }
        }

        /// Pre-populates `url` with `body`.
        pub fn with_entry(self, url: &str, body: impl Into<Bytes>) -> Self {
            self.entries.lock().insert(url.to_string(), body.into());
            self
        }

        /// Number of lookups served so far.
        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        /// Number of stored entries.
        pub fn len(&self) -> usize {
            self.entries.lock().len()
        }
    }

    impl Default for StubResponseCache {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ResponseCachePort for StubResponseCache {
        fn cached_response(&self, key: &ImageKey) -> Option<Bytes> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.entries.lock().get(key.as_str()).cloned()
        }
    }

    #[async_trait]
    impl ResponseStorePort for StubResponseCache {
        async fn store(&self, key: &ImageKey, body: &Bytes) -> CacheResult<()> {
            self.entries
                .lock()
                .insert(key.as_str().to_string(), body.clone());
            Ok(())
        }
    }
}
