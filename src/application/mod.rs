//! Application layer: per-URL loading and caching of remote images.

/// Loader, registry and their shared collaborators.
pub mod services;
/// Single-threaded execution context.
pub mod ui_context;

pub use services::{ImageLoader, ImagePipeline, LoaderRegistry};
pub use ui_context::UiContext;
