//! Process-wide URL to loader mapping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use super::image_loader::ImageLoader;
use super::pipeline::ImagePipeline;
use crate::domain::entities::ImageKey;

/// Get-or-create map from URL to its shared loader.
///
/// Owned by the composition root and handed out by reference. The map only
/// grows. Not `Send`: it belongs to the `UiContext` like the loaders it
/// holds.
pub struct LoaderRegistry {
    pipeline: ImagePipeline,
    loaders: RefCell<HashMap<ImageKey, Rc<ImageLoader>>>,
}

impl LoaderRegistry {
    /// Creates an empty registry whose loaders use `pipeline`.
    #[must_use]
    pub fn new(pipeline: ImagePipeline) -> Self {
        Self {
            pipeline,
            loaders: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the loader for `key`, creating it on first request.
    ///
    /// Every call with an equal key returns the same instance.
    pub fn loader_for(&self, key: &ImageKey) -> Rc<ImageLoader> {
        if let Some(loader) = self.loaders.borrow().get(key) {
            return Rc::clone(loader);
        }

        debug!(key = %key, "Creating image loader");
        let loader = Rc::new(ImageLoader::new(key.clone(), self.pipeline.clone()));
        self.loaders
            .borrow_mut()
            .insert(key.clone(), Rc::clone(&loader));
        loader
    }

    /// Returns true if a loader exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &ImageKey) -> bool {
        self.loaders.borrow().contains_key(key)
    }

    /// Number of loaders created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.borrow().len()
    }

    /// Returns true if no loader has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The collaborators new loaders are built with.
    #[must_use]
    pub const fn pipeline(&self) -> &ImagePipeline {
        &self.pipeline
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("loaders", &self.len())
            .finish_non_exhaustive()
    }
}
