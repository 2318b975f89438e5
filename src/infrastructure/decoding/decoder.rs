//! `image`-crate decoder.

use tracing::trace;

use crate::domain::entities::DisplayableImage;
use crate::domain::ports::ImageDecoderPort;

/// Decodes PNG, JPEG and WebP bytes with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl ImageDecoderPort for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Option<DisplayableImage> {
        match image::load_from_memory(bytes) {
            Ok(img) => Some(DisplayableImage::new(img)),
            Err(e) => {
                trace!(error = %e, size = bytes.len(), "Failed to decode image bytes");
                None
            }
        }
    }
}

/// Encodes a blank RGB image as PNG. Test helper.
#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::new_rgb8(width, height)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let img = ImageCrateDecoder.decode(&png_bytes(10, 10)).unwrap();
        assert_eq!(img.dimensions(), (10, 10));
    }

    #[test]
    fn test_decode_malformed() {
        assert!(ImageCrateDecoder.decode(b"definitely not an image").is_none());
    }

    #[test]
    fn test_decode_empty() {
        assert!(ImageCrateDecoder.decode(&[]).is_none());
    }
}
