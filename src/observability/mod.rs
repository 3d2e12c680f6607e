//! Structured tracing to a rotating JSON-lines file.
//!
//! ```text
//! tracing macros → EnvFilter → fmt::layer().json() → FileWriter → pixsearch-trace.jsonl
//! ```
//!
//! The file lives in the data directory (see
//! [`infrastructure::paths`](crate::infrastructure::paths)), rotates at 10 MB
//! and keeps 3 backups. Stdout stays reserved for the gallery.
//!
//! # Usage
//!
//! ```rust,no_run
//! use pixsearch::observability::init_tracing;
//! use pixsearch::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("client started");
//! ```

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, TRACE_FILE_NAME};
