//! Errors raised while fetching image bytes.

use thiserror::Error;

/// Transport-level failure of a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },

    #[error("failed to read body: {message}")]
    Body { message: String },

    #[error("failed to create HTTP client: {message}")]
    ClientBuild { message: String },
}

impl FetchError {
    /// Returns the HTTP status code for non-success responses.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
