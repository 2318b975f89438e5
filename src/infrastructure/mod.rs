//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image decoding.
pub mod decoding;
/// Fetch error reporting.
pub mod diagnostics;
/// HTTP client adapters.
pub mod http;
/// HTTP response caches.
pub mod response_cache;

pub use config::{AppConfig, CliArgs, ConfigLoader, LogLevel};
pub use decoding::ImageCrateDecoder;
pub use diagnostics::TracingErrorReporter;
pub use http::{CachingFetcher, ReqwestFetcher};
pub use response_cache::{DiskResponseCache, MemoryResponseCache, open_response_store};
