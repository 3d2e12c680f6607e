//! Fetch status of the search session.
//!
//! # State Machine
//!
//! ```text
//! Idle ──FetchStarted──▶ Pending ──FetchSucceeded──▶ Resolved
//!  ▲                        │                           │
//!  │                        └──FetchFailed──▶ Rejected  │
//!  └────────── StartNewQuery / AdjustFilter ◀───────────┘
//! ```
//!
//! `Rejected` halts automatic fetching until the next query or filter change.

use std::fmt;

/// Lifecycle status of the current page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No request issued for the current query epoch yet.
    #[default]
    Idle,
    /// A page request is in flight.
    Pending,
    /// The last page request completed.
    Resolved,
    /// The last page request failed; `error` holds the reason.
    Rejected,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        };
        f.write_str(label)
    }
}
