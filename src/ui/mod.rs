//! Presentation boundary: view snapshot, text renderer and toast sink.
//!
//! # Modules
//!
//! - [`viewmodel`]: [`GalleryView`] computed from session state
//! - [`renderer`]: plain-text gallery rendering
//! - [`toast`]: [`Notifier`] trait and its console and recording sinks

pub mod renderer;
pub mod toast;
pub mod viewmodel;

pub use renderer::render;
pub use toast::{ConsoleToast, Notice, NoticeLog, Notifier};
pub use viewmodel::GalleryView;
