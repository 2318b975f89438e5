//! Errors raised by HTTP response cache backends.

/// Result type for response cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur during response cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// I/O error during cache operation.
    #[error("IO error: {0}")]
    IoError(String),
    /// The cache location could not be determined.
    #[error("cache directory unavailable")]
    NoCacheDir,
}
