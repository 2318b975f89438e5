//! Cache identity for remote images.

use std::str::FromStr;

use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::domain::errors::KeyError;

/// Unique identity of a remote image: its absolute URL.
///
/// Two keys built from equal URLs compare equal and hash identically, so they
/// resolve to the same loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(Url);

impl ImageKey {
    /// Parses an absolute `http`/`https` URL into a key.
    ///
    /// # Errors
    /// Returns `KeyError` if the input is not a valid absolute URL or uses a
    /// scheme other than `http` or `https`.
    pub fn parse(input: &str) -> Result<Self, KeyError> {
        let url = Url::parse(input.trim()).map_err(|e| KeyError::InvalidUrl {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        Self::try_from(url)
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Stable digest of the URL, used to name on-disk cache entries.
    #[must_use]
    pub fn cache_file_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_str().as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..16])
    }
}

impl TryFrom<Url> for ImageKey {
    type Error = KeyError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(KeyError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl FromStr for ImageKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_equal_urls_produce_equal_keys() {
        let a = ImageKey::parse("https://example.com/a.jpg").unwrap();
        let b = ImageKey::parse("https://example.com/a.jpg").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cache_file_id(), b.cache_file_id());
    }

    #[test]
    fn test_distinct_urls_produce_distinct_digests() {
        let a = ImageKey::parse("https://example.com/a.jpg").unwrap();
        let b = ImageKey::parse("https://example.com/b.jpg").unwrap();
        assert_ne!(a, b);
        assert_ne!(a.cache_file_id(), b.cache_file_id());
    }

    #[test]
    fn test_cache_file_id_length() {
        let key = ImageKey::parse("https://images.example.org/photo-1.jpg?w=200").unwrap();
        assert_eq!(key.cache_file_id().len(), 32);
    }

    #[test_case("https://example.com/a.jpg" ; "https")]
    #[test_case("http://example.com/a.png" ; "http")]
    #[test_case("  https://example.com/padded.webp  " ; "surrounding_whitespace")]
    fn test_parse_accepts(input: &str) {
        assert!(ImageKey::parse(input).is_ok());
    }

    #[test_case("not a url" ; "garbage")]
    #[test_case("/relative/path.png" ; "relative")]
    #[test_case("ftp://example.com/a.jpg" ; "ftp_scheme")]
    #[test_case("file:///tmp/a.jpg" ; "file_scheme")]
    fn test_parse_rejects(input: &str) {
        assert!(ImageKey::parse(input).is_err());
    }
}
