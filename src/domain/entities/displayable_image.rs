//! Decoded images and raw fetch results.

use std::sync::Arc;

use bytes::Bytes;

/// A decoded image ready for display.
///
/// Cloning is cheap: all clones share the same pixel buffer.
#[derive(Debug, Clone)]
pub struct DisplayableImage(Arc<image::DynamicImage>);

impl DisplayableImage {
    /// Wraps a decoded image.
    #[must_use]
    pub fn new(image: image::DynamicImage) -> Self {
        Self(Arc::new(image))
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Returns true if both handles point at the same decoded buffer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Body and metadata of a successful HTTP fetch.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// Response body.
    pub body: Bytes,
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if present.
    pub content_type: Option<String>,
}

impl FetchedResponse {
    /// Creates a `200 OK` response with the given body and no content type.
    #[must_use]
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            status: 200,
            content_type: None,
        }
    }
}
