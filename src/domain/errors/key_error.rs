//! Errors raised while building image keys.

use thiserror::Error;

/// An input could not be turned into an `ImageKey`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum KeyError {
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}
