//! Text gallery of remote images sharing one loader registry.

use std::time::Duration;

use tracing::{debug, info};

use crate::application::{LoaderRegistry, UiContext};
use crate::domain::entities::ImageKey;
use crate::presentation::widgets::{AsyncImage, Rendered};

type PlaceholderFn = Box<dyn FnMut() -> String>;

/// One row per URL: dimensions once loaded, the placeholder until then.
pub struct Gallery<'r> {
    cells: Vec<AsyncImage<'r, String, PlaceholderFn>>,
}

impl<'r> Gallery<'r> {
    /// Creates a gallery cell for every key.
    #[must_use]
    pub fn new(keys: Vec<ImageKey>, registry: &'r LoaderRegistry, placeholder: &str) -> Self {
        let cells = keys
            .into_iter()
            .map(|key| {
                let placeholder = placeholder.to_string();
                let producer: PlaceholderFn = Box::new(move || placeholder.clone());
                AsyncImage::shared(key, registry, producer).resizable()
            })
            .collect();
        Self { cells }
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the gallery has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Starts loading every cell.
    pub fn appear(&mut self, ui: &UiContext) {
        for cell in &mut self.cells {
            cell.on_appear(ui);
        }
    }

    /// Renders the current frame, one line per cell.
    pub fn frame(&mut self) -> Vec<String> {
        self.cells
            .iter_mut()
            .map(|cell| {
                let url = cell.url().to_string();
                match cell.render() {
                    Rendered::Image { image, resizable } => {
                        let (w, h) = image.dimensions();
                        let fit = if resizable { " (fit)" } else { "" };
                        format!("{url}  {w}x{h}{fit}")
                    }
                    Rendered::Placeholder(text) => format!("{url}  {text}"),
                }
            })
            .collect()
    }

    /// Drives `ui` until every cell's load has finished, successfully or
    /// not, or `limit` elapses. Returns the number of cells showing an image.
    pub async fn settle(&mut self, ui: &UiContext, limit: Duration) -> usize {
        let all_settled = async {
            for cell in &mut self.cells {
                cell.settled().await;
            }
        };
        if ui.run_until(tokio::time::timeout(limit, all_settled)).await.is_err() {
            debug!(limit_ms = limit.as_millis(), "Stopped waiting for images");
        }

        let shown = self
            .cells
            .iter_mut()
            .map(|cell| cell.render().is_image())
            .filter(|shown| *shown)
            .count();
        info!(shown, total = self.cells.len(), "Gallery settled");
        shown
    }
}

impl std::fmt::Debug for Gallery<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("cells", &self.cells)
            .finish()
    }
}
