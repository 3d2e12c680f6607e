//! Background workers that run page requests off the session thread.
//!
//! # Architecture
//!
//! - `messages`: job and completion types tagged with the fetch generation
//! - `handler`: [`FetchWorker`], which spawns one thread per page request

pub mod handler;
pub mod messages;

pub use handler::FetchWorker;
pub use messages::{FetchCompletion, FetchJob};
