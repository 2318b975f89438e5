mod async_image;

pub use async_image::{AsyncImage, Rendered};
