//! UI screens.

mod gallery;

pub use gallery::Gallery;
