//! Domain layer with core entities, errors and collaborator ports.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{DisplayableImage, FetchedResponse, ImageKey};
pub use errors::{CacheError, FetchError, KeyError};
pub use ports::{
    ErrorReporterPort, HttpFetchPort, ImageDecoderPort, NoResponseCache, ResponseCachePort,
    ResponseStorePort,
};
