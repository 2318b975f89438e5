//! Image decoding.

pub mod decoder;

pub use decoder::ImageCrateDecoder;
