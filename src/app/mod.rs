//! Application layer: the search state machine and its driver.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Messages → handle_message → State Mutations → Actions → Side Effects
//!                              ↑                                         ↓
//!                              └──────────── Fetch Completions ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the message handler
//! - [`handler`]: Message types and the transition/fetch-triggering logic
//! - [`session`]: Driver that executes actions and owns cancellation tokens
//! - [`state`]: Session state container and view computation
//! - [`status`]: Fetch status enum
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::{handle_message, Message, NewQuery, SessionState};
//!
//! let mut state = SessionState::default();
//! let (should_render, actions) =
//!     handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
//! assert!(should_render);
//! assert_eq!(actions.len(), 1);
//! ```

pub mod actions;
pub mod handler;
pub mod session;
pub mod state;
pub mod status;

pub use actions::Action;
pub use handler::{handle_message, Filter, Message, NewQuery};
pub use session::SearchSession;
pub use state::SessionState;
pub use status::FetchStatus;
