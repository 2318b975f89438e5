//! Display element for a remote image.

use std::marker::PhantomData;
use std::rc::Rc;

use tokio::task::JoinHandle;

use crate::application::{ImageLoader, ImagePipeline, LoaderRegistry, UiContext};
use crate::domain::entities::{DisplayableImage, ImageKey};

/// What a display element shows on a given frame.
#[derive(Debug, Clone)]
pub enum Rendered<P> {
    /// The image is available.
    Image {
        /// Decoded image.
        image: DisplayableImage,
        /// Whether the image should be scaled to its frame.
        resizable: bool,
    },
    /// The image is not available (not loaded yet, failed, or never started).
    Placeholder(P),
}

impl<P> Rendered<P> {
    /// Returns true if an image is shown.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    /// Returns the image, if shown.
    #[must_use]
    pub const fn image(&self) -> Option<&DisplayableImage> {
        match self {
            Self::Image { image, .. } => Some(image),
            Self::Placeholder(_) => None,
        }
    }
}

enum LoaderSource<'r> {
    Owned(ImagePipeline),
    Shared(&'r LoaderRegistry),
}

impl LoaderSource<'_> {
    fn resolve(&self, url: &ImageKey) -> Rc<ImageLoader> {
        match self {
            Self::Owned(pipeline) => Rc::new(ImageLoader::new(url.clone(), pipeline.clone())),
            Self::Shared(registry) => registry.loader_for(url),
        }
    }
}

/// Shows a remote image, or a placeholder until it is available.
///
/// Loading is keyed on URL identity: `on_appear` starts a load once per
/// distinct URL, and changing the URL cancels the previous load task.
/// Dropping the element cancels its task as well.
pub struct AsyncImage<'r, P, F> {
    url: ImageKey,
    source: LoaderSource<'r>,
    loader: Rc<ImageLoader>,
    placeholder: F,
    resizable: bool,
    triggered: Option<ImageKey>,
    task: Option<JoinHandle<()>>,
    _frame: PhantomData<fn() -> P>,
}

impl<'r, P, F> AsyncImage<'r, P, F>
where
    F: FnMut() -> P,
{
    /// Creates an element with a private loader built from `pipeline`.
    #[must_use]
    pub fn owned(url: ImageKey, pipeline: ImagePipeline, placeholder: F) -> Self {
        Self::with_source(url, LoaderSource::Owned(pipeline), placeholder)
    }

    /// Creates an element whose loader is shared through `registry`.
    #[must_use]
    pub fn shared(url: ImageKey, registry: &'r LoaderRegistry, placeholder: F) -> Self {
        Self::with_source(url, LoaderSource::Shared(registry), placeholder)
    }

    fn with_source(url: ImageKey, source: LoaderSource<'r>, placeholder: F) -> Self {
        let loader = source.resolve(&url);
        Self {
            url,
            source,
            loader,
            placeholder,
            resizable: false,
            triggered: None,
            task: None,
            _frame: PhantomData,
        }
    }

    /// Marks the image as scalable to its frame.
    #[must_use]
    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    /// The URL currently displayed.
    #[must_use]
    pub const fn url(&self) -> &ImageKey {
        &self.url
    }

    /// The loader backing the current URL.
    #[must_use]
    pub const fn loader(&self) -> &Rc<ImageLoader> {
        &self.loader
    }

    /// Points the element at a different URL.
    ///
    /// Setting the same URL again is a no-op. The next `on_appear` loads the
    /// new URL.
    pub fn set_url(&mut self, url: ImageKey) {
        if url == self.url {
            return;
        }
        self.loader = self.source.resolve(&url);
        self.url = url;
    }

    /// Starts loading the current URL on `ui` unless it was already started.
    ///
    /// A previous load for a different URL is cancelled.
    pub fn on_appear(&mut self, ui: &UiContext) {
        if self.triggered.as_ref() == Some(&self.url) {
            return;
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }

        let loader = Rc::clone(&self.loader);
        self.task = Some(ui.spawn(async move { loader.load().await }));
        self.triggered = Some(self.url.clone());
    }

    /// Produces the current frame.
    pub fn render(&mut self) -> Rendered<P> {
        match self.loader.current_image() {
            Some(image) => Rendered::Image {
                image,
                resizable: self.resizable,
            },
            None => Rendered::Placeholder((self.placeholder)()),
        }
    }

    /// Returns true while the backing loader is fetching.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Waits for the load started by `on_appear` to finish, whether it
    /// stored an image or failed. Resolves immediately if no load was started.
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.as_mut() {
            let _ = task.await;
            self.task = None;
        }
    }

    /// Waits until the backing loader stores an image.
    ///
    /// Resolves immediately if it already has one. Never resolves if the
    /// load fails; callers bound it with a timeout.
    pub async fn loaded(&self) -> Option<DisplayableImage> {
        let mut rx = self.loader.subscribe();
        let image = rx.wait_for(Option::is_some).await.ok()?;
        (*image).clone()
    }
}

impl<P, F> Drop for AsyncImage<'_, P, F> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<P, F> std::fmt::Debug for AsyncImage<'_, P, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncImage")
            .field("url", &self.url)
            .field("resizable", &self.resizable)
            .field("triggered", &self.triggered)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::domain::ports::mocks::{StubFetcher, StubResponseCache};
    use crate::infrastructure::decoding::decoder::png_bytes;

    const URL_A: &str = "https://example/a.jpg";
    const URL_B: &str = "https://example/b.jpg";

    fn key(url: &str) -> ImageKey {
        ImageKey::parse(url).unwrap()
    }

    fn fetcher() -> Arc<StubFetcher> {
        Arc::new(
            StubFetcher::new()
                .respond(URL_A, png_bytes(10, 10))
                .respond(URL_B, png_bytes(20, 5)),
        )
    }

    #[tokio::test]
    async fn test_placeholder_then_image() {
        let ui = UiContext::new();
        let registry = LoaderRegistry::new(ImagePipeline::new(fetcher()));
        let mut element = AsyncImage::shared(key(URL_A), &registry, || "gray");

        assert!(matches!(element.render(), Rendered::Placeholder("gray")));

        element.on_appear(&ui);
        let loaded = ui.run_until(element.loaded()).await.unwrap();

        assert_eq!(loaded.dimensions(), (10, 10));
        assert_eq!(element.render().image().unwrap().dimensions(), (10, 10));
    }

    #[tokio::test]
    async fn test_rerender_with_same_url_does_not_refetch() {
        let ui = UiContext::new();
        let fetcher = fetcher();
        let registry = LoaderRegistry::new(ImagePipeline::new(fetcher.clone()));
        let mut element = AsyncImage::shared(key(URL_A), &registry, || ());

        element.on_appear(&ui);
        element.set_url(key(URL_A));
        element.on_appear(&ui);
        ui.run_until(element.loaded()).await;
        element.on_appear(&ui);
        let _ = element.render();
        ui.run_until(tokio::task::yield_now()).await;

        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_url_change_triggers_new_load() {
        let ui = UiContext::new();
        let fetcher = fetcher();
        let registry = LoaderRegistry::new(ImagePipeline::new(fetcher.clone()));
        let mut element = AsyncImage::shared(key(URL_A), &registry, || ());

        element.on_appear(&ui);
        ui.run_until(element.loaded()).await;

        element.set_url(key(URL_B));
        assert!(!element.render().is_image());
        element.on_appear(&ui);
        let loaded = ui.run_until(element.loaded()).await.unwrap();

        assert_eq!(loaded.dimensions(), (20, 5));
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_elements_with_same_url_share_one_image() {
        let ui = UiContext::new();
        let fetcher = fetcher();
        let registry = LoaderRegistry::new(ImagePipeline::new(fetcher.clone()));
        let mut grid_cell = AsyncImage::shared(key(URL_A), &registry, || ());
        let mut detail = AsyncImage::shared(key(URL_A), &registry, || ()).resizable();

        grid_cell.on_appear(&ui);
        detail.on_appear(&ui);
        ui.run_until(detail.loaded()).await;

        let Rendered::Image { image, resizable } = detail.render() else {
            panic!("expected image");
        };
        assert!(resizable);
        assert!(image.ptr_eq(grid_cell.render().image().unwrap()));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_owned_elements_do_not_share() {
        let ui = UiContext::new();
        let fetcher = fetcher();
        let pipeline = ImagePipeline::new(fetcher.clone());
        let mut first = AsyncImage::owned(key(URL_A), pipeline.clone(), || ());
        let mut second = AsyncImage::owned(key(URL_A), pipeline, || ());

        first.on_appear(&ui);
        second.on_appear(&ui);
        ui.run_until(async {
            first.loaded().await;
            second.loaded().await;
        })
        .await;

        assert!(!Rc::ptr_eq(first.loader(), second.loader()));
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_response_cache_hit_renders_without_loading() {
        let response_cache = Arc::new(StubResponseCache::new().with_entry(URL_B, png_bytes(4, 4)));
        let fetcher = Arc::new(StubFetcher::new());
        let pipeline = ImagePipeline::new(fetcher.clone()).with_response_cache(response_cache);
        let mut element = AsyncImage::owned(key(URL_B), pipeline, || ());

        assert_eq!(element.render().image().unwrap().dimensions(), (4, 4));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_placeholder() {
        let ui = UiContext::new();
        let registry = LoaderRegistry::new(ImagePipeline::new(Arc::new(StubFetcher::new())));
        let mut element = AsyncImage::shared(key(URL_A), &registry, || "gray");

        element.on_appear(&ui);
        let waited = ui
            .run_until(tokio::time::timeout(
                Duration::from_millis(50),
                element.loaded(),
            ))
            .await;

        assert!(waited.is_err());
        assert!(!element.is_loading());
        assert!(matches!(element.render(), Rendered::Placeholder("gray")));
    }

    #[tokio::test]
    async fn test_settled_returns_after_failure() {
        let ui = UiContext::new();
        let registry = LoaderRegistry::new(ImagePipeline::new(Arc::new(StubFetcher::new())));
        let mut element = AsyncImage::shared(key(URL_A), &registry, || "gray");

        element.settled().await;
        element.on_appear(&ui);
        ui.run_until(element.settled()).await;

        assert!(!element.is_loading());
        assert!(matches!(element.render(), Rendered::Placeholder("gray")));
    }

    #[tokio::test]
    async fn test_drop_cancels_load() {
        let ui = UiContext::new();
        let gate = Arc::new(tokio::sync::Notify::new());
        let fetcher = Arc::new(
            StubFetcher::new()
                .respond(URL_A, png_bytes(10, 10))
                .with_gate(gate.clone()),
        );
        let registry = LoaderRegistry::new(ImagePipeline::new(fetcher.clone()));
        let loader = registry.loader_for(&key(URL_A));

        let mut element = AsyncImage::shared(key(URL_A), &registry, || ());
        element.on_appear(&ui);
        ui.run_until(async {
            while !loader.is_loading() {
                tokio::task::yield_now().await;
            }
        })
        .await;

        drop(element);
        ui.run_until(async {
            while loader.is_loading() {
                tokio::task::yield_now().await;
            }
        })
        .await;

        assert!(loader.cached_image().is_none());
        assert_eq!(fetcher.calls(), 1);
    }
}
