//! Blocking HTTP fetcher for the Pixabay image API.
//!
//! Issues one `GET` per page with `ureq` and decodes the `hits` array of the
//! JSON response into raw records. Blocking sockets cannot be interrupted, so
//! cancellation is checked before the request goes out and again after the
//! body has been read; a canceled fetch never returns data.

use super::backend::{CancelToken, ImageFetcher};
use crate::domain::error::{PixsearchError, Result};
use crate::domain::{RawRecord, SearchOptions};
use serde::Deserialize;
use std::time::Duration;

/// Public Pixabay endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Default global request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Envelope of a Pixabay search response.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default, rename = "totalHits")]
    total_hits: u64,
    hits: Vec<RawRecord>,
}

/// [`ImageFetcher`] backed by the Pixabay REST API.
pub struct PixabayFetcher {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl PixabayFetcher {
    /// Creates a fetcher with a shared agent (reused across pages).
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for PixabayFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixabayFetcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ImageFetcher for PixabayFetcher {
    fn fetch(&self, options: &SearchOptions, token: &CancelToken) -> Result<Vec<RawRecord>> {
        let _span = tracing::debug_span!("pixabay_fetch",
            query = %options.query,
            page = options.page,
            per_page = options.page_size
        ).entered();

        token.check()?;

        let mut request = self.agent.get(&self.base_url).query("key", &self.api_key);
        for (name, value) in options.query_pairs() {
            request = request.query(name, value);
        }

        let mut response = request.call().map_err(classify_error)?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(classify_error)?;

        // The socket may have finished after the session moved on.
        token.check()?;

        let hits = parse_page(&body)?;
        tracing::debug!(hits = hits.len(), "page decoded");
        Ok(hits)
    }
}

/// Decodes a response body into the page's raw records.
///
/// # Errors
///
/// Returns [`PixsearchError::Decode`] when the body is not JSON or has no
/// `hits` array.
pub fn parse_page(body: &str) -> Result<Vec<RawRecord>> {
    let page: SearchPage =
        serde_json::from_str(body).map_err(|e| PixsearchError::Decode(e.to_string()))?;
    tracing::trace!(total_hits = page.total_hits, "response envelope parsed");
    Ok(page.hits)
}

/// Splits transport failures from HTTP status failures.
fn classify_error(error: ureq::Error) -> PixsearchError {
    match error {
        ureq::Error::StatusCode(status) => PixsearchError::Http { status },
        other => PixsearchError::Network(other.to_string()),
    }
}
