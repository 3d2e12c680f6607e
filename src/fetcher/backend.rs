//! Fetcher trait and cooperative cancellation token.
//!
//! Defines the [`ImageFetcher`] seam the search session depends on, so the
//! HTTP implementation can be swapped for scripted fetchers in tests.

use crate::domain::error::{PixsearchError, Result};
use crate::domain::{RawRecord, SearchOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag for one fetch.
///
/// Cloning yields a handle to the same flag. The session keeps one clone and
/// hands the other to the worker; canceling either is visible to both.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the fetch as canceled. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(PixsearchError::Cancelled)` once the token has been canceled.
    ///
    /// # Errors
    ///
    /// Fails with [`PixsearchError::Cancelled`] if [`cancel`](Self::cancel) was called.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(PixsearchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Performs one page request against an image API.
///
/// Implementations must honour the token: once it is canceled they must not
/// return `Ok` with data. Returning [`PixsearchError::Cancelled`] is the
/// expected outcome, although the session also ignores any completion that
/// belongs to a superseded generation.
pub trait ImageFetcher: Send + Sync {
    /// Fetches the page described by `options`.
    ///
    /// An empty vector means the query has no more results.
    ///
    /// # Errors
    ///
    /// - [`PixsearchError::Network`] when no response was received
    /// - [`PixsearchError::Http`] for non-success statuses
    /// - [`PixsearchError::Decode`] for malformed bodies
    /// - [`PixsearchError::Cancelled`] when `token` was canceled
    fn fetch(&self, options: &SearchOptions, token: &CancelToken) -> Result<Vec<RawRecord>>;
}
