//! HTTP response caches.
//!
//! This module provides:
//! - Memory caching with LRU eviction
//! - Disk caching for persistence across runs
//!
//! Both are filled by `CachingFetcher` and only read by image loaders.

pub mod disk_cache;
pub mod memory_cache;

pub use disk_cache::{DEFAULT_MAX_CACHE_SIZE, DiskResponseCache, default_cache_dir};
pub use memory_cache::{CacheStats, DEFAULT_CACHE_ENTRIES, MemoryResponseCache};

use std::sync::Arc;

use crate::domain::errors::CacheResult;
use crate::domain::ports::ResponseStorePort;
use crate::infrastructure::config::{CacheConfig, CacheMode};

/// Opens the response store selected by `config`.
/// Returns `None` when response caching is off.
///
/// # Errors
/// Returns error if the disk cache directory cannot be created or read.
pub async fn open_response_store(
    config: &CacheConfig,
) -> CacheResult<Option<Arc<dyn ResponseStorePort>>> {
    let store: Arc<dyn ResponseStorePort> = match config.mode {
        CacheMode::Off => return Ok(None),
        CacheMode::Memory => Arc::new(MemoryResponseCache::new(config.memory_entries)),
        CacheMode::Disk => match &config.dir {
            Some(dir) => Arc::new(DiskResponseCache::new(dir.clone(), config.max_disk_bytes).await?),
            None => Arc::new(DiskResponseCache::default_location(config.max_disk_bytes).await?),
        },
    };
    Ok(Some(store))
}
