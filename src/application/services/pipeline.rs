//! Collaborators shared by every image loader.

use std::sync::Arc;

use crate::domain::ports::{
    ErrorReporterPort, HttpFetchPort, ImageDecoderPort, NoResponseCache, ResponseCachePort,
};
use crate::infrastructure::{ImageCrateDecoder, TracingErrorReporter};

/// The fetch, response-cache, decode and error-reporting collaborators a
/// loader works with.
#[derive(Clone)]
pub struct ImagePipeline {
    fetcher: Arc<dyn HttpFetchPort>,
    response_cache: Arc<dyn ResponseCachePort>,
    decoder: Arc<dyn ImageDecoderPort>,
    reporter: Arc<dyn ErrorReporterPort>,
}

impl ImagePipeline {
    /// Creates a pipeline around `fetcher` with no response cache, the
    /// `image`-crate decoder and `tracing` error reporting.
    #[must_use]
    pub fn new(fetcher: Arc<dyn HttpFetchPort>) -> Self {
        Self {
            fetcher,
            response_cache: Arc::new(NoResponseCache),
            decoder: Arc::new(ImageCrateDecoder),
            reporter: Arc::new(TracingErrorReporter),
        }
    }

    /// Sets the response cache consulted when a loader holds no image.
    #[must_use]
    pub fn with_response_cache(mut self, response_cache: Arc<dyn ResponseCachePort>) -> Self {
        self.response_cache = response_cache;
        self
    }

    /// Sets the decoder.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn ImageDecoderPort>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Sets the error reporter.
    #[must_use]
    pub fn with_error_reporter(mut self, reporter: Arc<dyn ErrorReporterPort>) -> Self {
        self.reporter = reporter;
        self
    }

    /// HTTP client collaborator.
    #[must_use]
    pub fn fetcher(&self) -> &Arc<dyn HttpFetchPort> {
        &self.fetcher
    }

    /// Response cache collaborator.
    #[must_use]
    pub fn response_cache(&self) -> &Arc<dyn ResponseCachePort> {
        &self.response_cache
    }

    /// Decode collaborator.
    #[must_use]
    pub fn decoder(&self) -> &Arc<dyn ImageDecoderPort> {
        &self.decoder
    }

    /// Error reporting collaborator.
    #[must_use]
    pub fn reporter(&self) -> &Arc<dyn ErrorReporterPort> {
        &self.reporter
    }
}

impl std::fmt::Debug for ImagePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePipeline").finish_non_exhaustive()
    }
}
