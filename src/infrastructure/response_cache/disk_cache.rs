//! Disk-backed response cache for persistence across sessions.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use crate::domain::entities::ImageKey;
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::{ResponseCachePort, ResponseStorePort};

/// Maximum disk cache size in bytes (200 MB default).
pub const DEFAULT_MAX_CACHE_SIZE: u64 = 200 * 1024 * 1024;

const ENTRY_EXTENSION: &str = "img";

/// Disk-based cache that persists raw response bodies, one file per URL.
///
/// Writes are serialized so the size and entry counters match the files on
/// disk even when the same URL is stored concurrently.
pub struct DiskResponseCache {
    cache_dir: PathBuf,
    max_size: u64,
    current_size: AtomicU64,
    item_count: AtomicUsize,
    write_lock: Mutex<()>,
}

impl DiskResponseCache {
    /// Creates a new disk cache in the specified directory.
    ///
    /// # Errors
    /// Returns error if cache directory cannot be created.
    pub async fn new(cache_dir: PathBuf, max_size: u64) -> CacheResult<Self> {
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to create cache dir: {e}")))?;
        let mut total_size = 0u64;
        let mut count = 0usize;

        let mut entries = fs::read_dir(&cache_dir)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to read cache dir: {e}")))?;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION)
                && let Ok(meta) = entry.metadata().await
            {
                total_size += meta.len();
                count += 1;
            }
        }

        let cache = Self {
            cache_dir,
            max_size,
            current_size: AtomicU64::new(total_size),
            item_count: AtomicUsize::new(count),
            write_lock: Mutex::new(()),
        };

        cache.cleanup_if_needed().await;

        Ok(cache)
    }

    /// Creates a cache in the platform cache directory.
    ///
    /// # Errors
    /// Returns error if no cache directory exists or it cannot be created.
    pub async fn default_location(max_size: u64) -> CacheResult<Self> {
        let cache_dir = default_cache_dir().ok_or(CacheError::NoCacheDir)?;
        Self::new(cache_dir, max_size).await
    }

    fn entry_path(&self, key: &ImageKey) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{ENTRY_EXTENSION}", key.cache_file_id()))
    }

    /// Returns the current cache size in bytes.
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }

    /// Returns the number of cached files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.item_count.load(Ordering::Relaxed)
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes the least recently accessed files once over the size limit,
    /// down to 90% of the limit.
    async fn cleanup_if_needed(&self) {
        let current_size = self.current_size();
        if current_size <= self.max_size {
            return;
        }

        debug!(
            current_size = current_size,
            max_size = self.max_size,
            "Disk cache over limit, cleaning up"
        );

        let Ok(mut entries) = fs::read_dir(&self.cache_dir).await else {
            return;
        };

        let mut files: Vec<(PathBuf, std::time::SystemTime, u64)> = Vec::new();

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != ENTRY_EXTENSION) {
                continue;
            }

            if let Ok(meta) = entry.metadata().await {
                let accessed = meta
                    .accessed()
                    .or_else(|_| meta.modified())
                    .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
                files.push((path, accessed, meta.len()));
            }
        }

        files.sort_by_key(|(_, time, _)| *time);

        let mut freed_size = 0u64;
        let mut freed_count = 0usize;
        let target = current_size - self.max_size + (self.max_size / 10);

        for (path, _, size) in files {
            if freed_size >= target {
                break;
            }

            if let Err(e) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove old cache file");
            } else {
                trace!(path = %path.display(), "Removed old cache file");
                freed_size += size;
                freed_count += 1;
            }
        }
        self.current_size.fetch_sub(freed_size, Ordering::Relaxed);
        self.item_count.fetch_sub(freed_count, Ordering::Relaxed);

        debug!(
            freed_size = freed_size,
            freed_count = freed_count,
            "Disk cache cleanup complete"
        );
    }
}

impl std::fmt::Debug for DiskResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskResponseCache")
            .field("cache_dir", &self.cache_dir)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

impl ResponseCachePort for DiskResponseCache {
    fn cached_response(&self, key: &ImageKey) -> Option<Bytes> {
        let path = self.entry_path(key);
        if let Ok(bytes) = std::fs::read(&path) {
            trace!(key = %key, path = %path.display(), "Disk cache hit");
            Some(Bytes::from(bytes))
        } else {
            trace!(key = %key, "Disk cache miss");
            None
        }
    }
}

#[async_trait]
impl ResponseStorePort for DiskResponseCache {
    async fn store(&self, key: &ImageKey, body: &Bytes) -> CacheResult<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.entry_path(key);

        let old_size = fs::metadata(&path).await.map(|m| m.len()).ok();

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to create cache file: {e}")))?;

        file.write_all(body)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to write cache file: {e}")))?;

        file.flush()
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to flush cache file: {e}")))?;

        let new_size = body.len() as u64;
        if let Some(old) = old_size {
            if new_size > old {
                self.current_size
                    .fetch_add(new_size - old, Ordering::Relaxed);
            } else {
                self.current_size
                    .fetch_sub(old - new_size, Ordering::Relaxed);
            }
        } else {
            self.current_size.fetch_add(new_size, Ordering::Relaxed);
            self.item_count.fetch_add(1, Ordering::Relaxed);
        }

        debug!(key = %key, path = %path.display(), size = body.len(), "Stored response in disk cache");

        self.cleanup_if_needed().await;

        Ok(())
    }
}

/// Returns the platform cache directory for stored responses.
#[must_use]
pub fn default_cache_dir() -> Option<PathBuf> {
    crate::infrastructure::config::project_dirs().map(|dirs| dirs.cache_dir().join("responses"))
}
