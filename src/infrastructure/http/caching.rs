//! Fetcher decorator that records successful responses in a response cache.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::entities::{FetchedResponse, ImageKey};
use crate::domain::errors::FetchError;
use crate::domain::ports::{HttpFetchPort, ResponseStorePort};

/// Wraps a fetcher and stores every successful body in `store`.
///
/// This plays the role of the platform HTTP cache: loaders read from the
/// same store through `ResponseCachePort` but never write to it.
pub struct CachingFetcher {
    inner: Arc<dyn HttpFetchPort>,
    store: Arc<dyn ResponseStorePort>,
}

impl CachingFetcher {
    /// Creates a caching fetcher.
    #[must_use]
    pub fn new(inner: Arc<dyn HttpFetchPort>, store: Arc<dyn ResponseStorePort>) -> Self {
        Self { inner, store }
    }
}

impl std::fmt::Debug for CachingFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpFetchPort for CachingFetcher {
    async fn fetch(&self, key: &ImageKey) -> Result<FetchedResponse, FetchError> {
        let response = self.inner.fetch(key).await?;

        if let Err(e) = self.store.store(key, &response.body).await {
            warn!(key = %key, error = %e, "Failed to store response");
        }

        Ok(response)
    }
}
