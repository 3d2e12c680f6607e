//! Domain layer for the pixsearch client.
//!
//! Core types shared by the session, the fetch layer and the renderer,
//! independent of HTTP or terminal concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Raw API records, gallery entries and the normalizer
//! - [`options`]: Search parameters and filter enums
//!
//! # Examples
//!
//! ```
//! use pixsearch::domain::{normalize, RawRecord};
//!
//! let images = normalize(&[RawRecord::default()]);
//! assert_eq!(images[0].id, "");
//! ```

pub mod error;
pub mod image;
pub mod options;

pub use error::{PixsearchError, Result};
pub use image::{normalize, GalleryImage, RawRecord};
pub use options::{Category, Orientation, SearchOptions};
