//! Fetch layer: one network call per page.
//!
//! - [`backend`]: [`ImageFetcher`] trait and [`CancelToken`]
//! - [`pixabay`]: `ureq`-based implementation for the Pixabay API

pub mod backend;
pub mod pixabay;

pub use backend::{CancelToken, ImageFetcher};
pub use pixabay::{parse_page, PixabayFetcher};
