//! Diagnostic output for failed image fetches.

use tracing::error;

use crate::domain::entities::ImageKey;
use crate::domain::errors::FetchError;
use crate::domain::ports::ErrorReporterPort;

/// Reports fetch errors through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorReporter;

impl ErrorReporterPort for TracingErrorReporter {
    fn report(&self, key: &ImageKey, error: &FetchError) {
        error!(key = %key, error = %error, "Image fetch failed");
    }
}
