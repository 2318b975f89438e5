//! Domain entity definitions.

mod displayable_image;
mod image_key;

pub use displayable_image::{DisplayableImage, FetchedResponse};
pub use image_key::ImageKey;
