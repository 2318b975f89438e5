//! async-image - fetch-once, cache-forever loading of remote images.
//!
//! A `LoaderRegistry` hands out one shared `ImageLoader` per URL. Each loader
//! fetches its image at most once, decodes it and keeps it for the lifetime
//! of the registry. Display elements render the loaded image or a
//! placeholder, and fall back to the HTTP response cache before anything
//! has been loaded.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the loader, the registry and the UI context.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing display elements.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "async-image";
