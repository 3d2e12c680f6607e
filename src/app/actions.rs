//! Actions representing side effects to be executed by the session driver.
//!
//! The message handler never performs I/O. It returns a `Vec<Action>` after
//! each message and [`SearchSession`](crate::app::SearchSession) executes them
//! in order: spawning or canceling fetch workers and raising toast
//! notifications.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::Action;
//! use pixsearch::domain::SearchOptions;
//!
//! let actions = vec![
//!     Action::CancelFetch { generation: 1 },
//!     Action::StartFetch { generation: 2, options: SearchOptions::default() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::SearchOptions;

/// Commands produced by the message handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issues a page request for `options` tagged with `generation`.
    ///
    /// The driver applies `FetchStarted` for the same generation before the
    /// worker is spawned.
    StartFetch {
        generation: u64,
        options: SearchOptions,
    },

    /// Cancels the in-flight request of `generation`.
    ///
    /// Always emitted before a `StartFetch` that supersedes it.
    CancelFetch { generation: u64 },

    /// Tells the toast layer a page arrived; `count` is the running total.
    NotifyOk { count: usize },

    /// Tells the toast layer there is nothing more to load.
    NotifyEnd { count: usize },
}
