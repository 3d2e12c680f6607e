//! Job and completion types exchanged with fetch worker threads.
//!
//! The session sends a [`FetchJob`] when it spawns a worker and receives a
//! [`FetchCompletion`] over an mpsc channel when the worker finishes. Both are
//! tagged with the fetch generation so the session can tell current results
//! from stale ones.

use crate::domain::error::Result;
use crate::domain::{RawRecord, SearchOptions};
use crate::fetcher::CancelToken;

/// A page request handed to a worker thread.
#[derive(Debug, Clone)]
pub struct FetchJob {
    pub generation: u64,
    pub options: SearchOptions,
    pub token: CancelToken,
}

/// Outcome of a page request, sent back to the session.
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: u64,
    pub outcome: Result<Vec<RawRecord>>,
}
