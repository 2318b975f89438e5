//! Image loading services.

mod image_loader;
mod loader_registry;
mod pipeline;

pub use image_loader::ImageLoader;
pub use loader_registry::LoaderRegistry;
pub use pipeline::ImagePipeline;
