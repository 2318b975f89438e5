//! Port definition for reporting fetch failures.

use crate::domain::entities::ImageKey;
use crate::domain::errors::FetchError;

/// Receives fetch errors for diagnostic output.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporterPort: Send + Sync {
    /// Reports a failed fetch of `key`.
    fn report(&self, key: &ImageKey, error: &FetchError);
}
