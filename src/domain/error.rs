//! Error types for the pixsearch client.
//!
//! This module defines the centralized error type [`PixsearchError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for pixsearch operations.
///
/// Fetch-layer variants (`Http`, `Network`, `Decode`, `Cancelled`) never escape
/// the search session: they are folded into the session's `Rejected` state or,
/// for `Cancelled`, dropped silently. The remaining variants surface from
/// configuration loading and runtime setup.
///
/// # Examples
///
/// ```
/// use pixsearch::PixsearchError;
///
/// fn validate_page_size(size: u32) -> Result<(), PixsearchError> {
///     if size < 3 {
///         return Err(PixsearchError::Config(format!("page_size {size} is below 3")));
///     }
///     Ok(())
/// }
/// assert!(validate_page_size(2).is_err());
/// ```
#[derive(Debug, Error)]
pub enum PixsearchError {
    /// The image API answered with a non-success HTTP status.
    #[error("HTTP error: status {status}")]
    Http {
        /// Status code returned by the server.
        status: u16,
    },

    /// The request never produced an HTTP response (DNS, TLS, timeout, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded into a page of records.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The fetch was canceled before it completed.
    ///
    /// Not a failure from the user's point of view; the session discards it.
    #[error("request canceled")]
    Cancelled,

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A fetch worker thread could not be spawned or reported back.
    #[error("Worker error: {0}")]
    Worker(String),
}

impl PixsearchError {
    /// Returns `true` for the cancellation outcome, which callers must ignore.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// A specialized `Result` type for pixsearch operations.
pub type Result<T> = std::result::Result<T, PixsearchError>;
