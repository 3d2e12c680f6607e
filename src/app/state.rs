//! Session state and its transition primitives.
//!
//! [`SessionState`] is the single source of truth for one search session: the
//! active [`SearchOptions`], accumulated gallery entries and the pagination and
//! fetch bookkeeping around them. The message handler composes the methods in
//! this module; nothing here performs I/O.
//!
//! # Query Epochs
//!
//! Every query or filter change starts a new epoch. Starting an epoch clears
//! `results`, rewinds `page` and `page_count` to 1 and clears `is_last_page`
//! in one call, so a gallery never mixes entries from two queries.
//!
//! # Generations
//!
//! Each issued fetch gets a fresh generation number. Only the generation
//! recorded in `in_flight` may complete; anything else is stale.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::{NewQuery, SessionState};
//!
//! let mut state = SessionState::default();
//! state.start_new_query(&NewQuery::text("cats"));
//! assert!(state.needs_fetch());
//! ```

use super::handler::{Filter, NewQuery};
use super::status::FetchStatus;
use crate::domain::{GalleryImage, SearchOptions};
use crate::ui::viewmodel::GalleryView;

/// State of one search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub status: FetchStatus,
    /// Failure reason; `Some` only while `status` is `Rejected`.
    pub error: Option<String>,
    pub results: Vec<GalleryImage>,
    /// Number of resolved pages plus one; `1` means nothing fetched yet.
    pub page_count: u32,
    pub is_last_page: bool,
    pub options: SearchOptions,
    generation: u64,
    in_flight: Option<u64>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

impl SessionState {
    /// Creates an idle session. Query text in `defaults` is discarded so that
    /// mounting never triggers a fetch.
    #[must_use]
    pub fn new(defaults: SearchOptions) -> Self {
        Self {
            status: FetchStatus::Idle,
            error: None,
            results: Vec::new(),
            page_count: 1,
            is_last_page: false,
            options: SearchOptions {
                query: String::new(),
                page: 1,
                ..defaults
            },
            generation: 0,
            in_flight: None,
        }
    }

    /// Replaces the query (and any filters carried along) and starts a new epoch.
    pub fn start_new_query(&mut self, fields: &NewQuery) {
        self.options.query = fields.query.trim().to_string();
        if let Some(category) = fields.category {
            self.options.category = category;
        }
        if let Some(orientation) = fields.orientation {
            self.options.orientation = orientation;
        }
        self.reset_epoch();
    }

    /// Merges one filter into the options and starts a new epoch.
    pub fn adjust_filter(&mut self, filter: Filter) {
        match filter {
            Filter::Category(category) => self.options.category = category,
            Filter::Orientation(orientation) => self.options.orientation = orientation,
        }
        self.reset_epoch();
    }

    fn reset_epoch(&mut self) {
        self.options.page = 1;
        self.results.clear();
        self.page_count = 1;
        self.is_last_page = false;
        self.status = FetchStatus::Idle;
        self.error = None;
    }

    /// Whether a load-more request is allowed right now.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.status == FetchStatus::Resolved && !self.is_last_page
    }

    /// Advances to the next page without touching accumulated results.
    pub fn request_next_page(&mut self) {
        self.options.page = self.options.page.saturating_add(1);
    }

    pub fn mark_pending(&mut self) {
        self.status = FetchStatus::Pending;
        self.error = None;
    }

    /// Appends a resolved page. An empty page marks the end of the results.
    pub fn resolve(&mut self, page: Vec<GalleryImage>) {
        self.is_last_page = page.is_empty();
        self.results.extend(page);
        self.page_count = self.page_count.saturating_add(1);
        self.status = FetchStatus::Resolved;
    }

    /// Records a failed page. Accumulated results are kept.
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.status = FetchStatus::Rejected;
        self.is_last_page = true;
        self.error = Some(reason.into());
    }

    /// The fetch-triggering rule: a non-empty query whose current page has
    /// not been resolved yet.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        !self.options.query.is_empty() && self.page_count <= self.options.page
    }

    /// Allocates the next generation and records it as in flight.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.generation
    }

    /// Forgets the in-flight generation, returning it if there was one.
    pub fn take_in_flight(&mut self) -> Option<u64> {
        self.in_flight.take()
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Whether `generation` is the fetch the session is waiting for.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.in_flight == Some(generation)
    }

    /// Builds the presentation snapshot handed to the rendering layer.
    #[must_use]
    pub fn view(&self) -> GalleryView<'_> {
        GalleryView {
            query: &self.options.query,
            status: self.status,
            results: &self.results,
            is_last_page: self.is_last_page,
            error: self.error.as_deref(),
            show_loader: self.status == FetchStatus::Pending,
            show_load_more: self.can_load_more(),
            search_busy: self.status == FetchStatus::Pending,
        }
    }
}
