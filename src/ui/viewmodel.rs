//! Presentation snapshot of a search session.
//!
//! [`GalleryView`] is everything a rendering layer needs: the gallery entries
//! plus the derived flags that drive the loader, the load-more button and the
//! busy state of the search input.

use crate::app::FetchStatus;
use crate::domain::GalleryImage;

/// Borrowed view of the session state, computed by
/// [`SessionState::view`](crate::app::SessionState::view).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryView<'a> {
    pub query: &'a str,
    pub status: FetchStatus,
    pub results: &'a [GalleryImage],
    pub is_last_page: bool,
    /// Failure reason while rejected. Whether to show it is up to the renderer.
    pub error: Option<&'a str>,
    /// A page request is in flight.
    pub show_loader: bool,
    /// The last page resolved with data and more may follow.
    pub show_load_more: bool,
    /// The search input should refuse new submissions.
    pub search_busy: bool,
}

impl GalleryView<'_> {
    /// Nothing to show and nothing loading.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && !self.show_loader
    }
}
