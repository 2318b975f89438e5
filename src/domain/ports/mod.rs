mod error_reporter_port;
mod http_fetch_port;
mod image_decoder_port;
mod response_cache_port;

pub use error_reporter_port::ErrorReporterPort;
pub use http_fetch_port::HttpFetchPort;
pub use image_decoder_port::ImageDecoderPort;
pub use response_cache_port::{NoResponseCache, ResponseCachePort, ResponseStorePort};
