//! Port definition for decoding image bytes.

use crate::domain::entities::DisplayableImage;

/// Port for the image decode collaborator.
pub trait ImageDecoderPort: Send + Sync {
    /// Decodes `bytes` into a displayable image.
    /// Returns `None` on malformed input; no error detail is propagated.
    fn decode(&self, bytes: &[u8]) -> Option<DisplayableImage>;
}
