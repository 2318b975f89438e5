//! Fetch-once, cache-forever holder for a single remote image.

use std::cell::Cell;

use tokio::sync::{Notify, watch};
use tracing::{debug, error, trace};

use super::pipeline::ImagePipeline;
use crate::domain::entities::{DisplayableImage, ImageKey};

/// Loads and holds the decoded image for one URL.
///
/// A loader starts empty and is populated at most once by a successful
/// `load`. Once populated its image is never cleared or replaced.
///
/// Loaders are `!Sync` and are shared through `Rc`: they live on the
/// `UiContext` together with everything that renders them.
pub struct ImageLoader {
    key: ImageKey,
    pipeline: ImagePipeline,
    image: watch::Sender<Option<DisplayableImage>>,
    in_flight: Cell<bool>,
    abandoned: Cell<bool>,
    settled: Notify,
}

impl ImageLoader {
    /// Creates an empty loader for `key`.
    #[must_use]
    pub fn new(key: ImageKey, pipeline: ImagePipeline) -> Self {
        let (image, _) = watch::channel(None);
        Self {
            key,
            pipeline,
            image,
            in_flight: Cell::new(false),
            abandoned: Cell::new(false),
            settled: Notify::new(),
        }
    }

    /// The URL this loader serves.
    #[must_use]
    pub const fn key(&self) -> &ImageKey {
        &self.key
    }

    /// Returns the image to display right now, if any.
    ///
    /// Falls back to the HTTP response cache when nothing has been loaded
    /// yet. An image decoded from the response cache is returned but not
    /// kept, so the next call decodes it again.
    #[must_use]
    pub fn current_image(&self) -> Option<DisplayableImage> {
        if let Some(image) = self.cached_image() {
            return Some(image);
        }

        let body = self.pipeline.response_cache().cached_response(&self.key)?;
        let image = self.pipeline.decoder().decode(&body);
        trace!(
            key = %self.key,
            decoded = image.is_some(),
            "Served from response cache"
        );
        image
    }

    /// Returns the loaded image without consulting the response cache.
    #[must_use]
    pub fn cached_image(&self) -> Option<DisplayableImage> {
        (*self.image.borrow()).clone()
    }

    /// Returns true while a fetch started by `load` is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.get()
    }

    /// Subscribes to the loaded image. The receiver is notified once, when
    /// the image is stored.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<DisplayableImage>> {
        self.image.subscribe()
    }

    /// Fetches, decodes and stores the image.
    ///
    /// Does nothing if an image is already stored. A call made while another
    /// load is in flight waits for that load to settle instead of fetching
    /// again, and only takes over if the other load was dropped before it
    /// finished. Transport failures go to the error reporter; undecodable
    /// bodies are dropped quietly. Either way the loader stays empty and no
    /// retry is attempted.
    pub async fn load(&self) {
        while self.in_flight.get() {
            trace!(key = %self.key, "Load already in flight, waiting");
            self.settled.notified().await;
            if !self.abandoned.get() {
                return;
            }
        }

        if self.image.borrow().is_some() {
            trace!(key = %self.key, "Already loaded, skipping fetch");
            return;
        }

        let attempt = InFlight::start(self);
        self.fetch_and_store().await;
        attempt.finish();
    }

    async fn fetch_and_store(&self) {
        debug!(key = %self.key, "Downloading image from network");

        let response = match self.pipeline.fetcher().fetch(&self.key).await {
            Ok(response) => response,
            Err(e) => {
                self.pipeline.reporter().report(&self.key, &e);
                return;
            }
        };

        let decoder = self.pipeline.decoder().clone();
        let body = response.body;
        let decoded = match tokio::task::spawn_blocking(move || decoder.decode(&body)).await {
            Ok(decoded) => decoded,
            Err(e) => {
                error!(key = %self.key, error = %e, "Decode task panicked");
                return;
            }
        };

        let Some(image) = decoded else {
            debug!(key = %self.key, "Response body is not a decodable image");
            return;
        };

        let (width, height) = image.dimensions();
        let stored = self.image.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(image);
            true
        });

        if stored {
            debug!(key = %self.key, width, height, "Image loaded successfully");
        }
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("key", &self.key)
            .field("loaded", &self.image.borrow().is_some())
            .field("in_flight", &self.in_flight.get())
            .finish_non_exhaustive()
    }
}

/// Marks a load as in flight until dropped.
///
/// Dropping without `finish` means the load was cancelled mid-fetch, which
/// lets a waiting caller take over.
struct InFlight<'a> {
    loader: &'a ImageLoader,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn start(loader: &'a ImageLoader) -> Self {
        loader.in_flight.set(true);
        Self {
            loader,
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.loader.in_flight.set(false);
        self.loader.abandoned.set(!self.finished);
        self.loader.settled.notify_waiters();
    }
}
