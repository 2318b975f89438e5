//! Presentation layer: display elements driven by loader state.

/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::Gallery;
pub use widgets::{AsyncImage, Rendered};
