//! Port definition for fetching remote image bytes.

use async_trait::async_trait;

use crate::domain::entities::{FetchedResponse, ImageKey};
use crate::domain::errors::FetchError;

/// Port for the HTTP client collaborator.
/// Implementations must be thread-safe.
#[async_trait]
pub trait HttpFetchPort: Send + Sync {
    /// Fetches the body for `key`.
    ///
    /// Non-success statuses are reported as `FetchError::Status`.
    async fn fetch(&self, key: &ImageKey) -> Result<FetchedResponse, FetchError>;
}
