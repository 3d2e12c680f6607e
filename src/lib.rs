//! pixsearch: an image search client with incremental, load-more pagination.
//!
//! pixsearch provides:
//! - A message-driven search session that accumulates result pages per query
//! - Cancellation of superseded requests via fetch generations
//! - A blocking HTTP fetcher for the Pixabay API
//! - A normalizer from raw API hits to gallery entries
//! - Toast-style notifications and a plain-text gallery renderer

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal client (main.rs)                          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Message handling                                 │
//! │  - Fetch triggering and generations                 │
//! │  - Session driver                                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Fetch Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (fetcher/)    │   │ (worker/)     │
//! │ - View model  │   │ - HTTP GET    │   │ - One thread  │
//! │ - Renderer    │   │ - Cancel token│   │   per fetch   │
//! │ - Toasts      │   │               │   │ - Completions │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config/data directories (infrastructure/)        │
//! │  - Error types, options, normalizer (domain/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - JSON-lines tracing to a rotating file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/pixsearch/config.toml
//! api_key = "12345-abcdef"
//! page_size = 24
//! category = "photo"
//! orientation = "horizontal"
//! timeout_secs = 15
//! trace_level = "debug"
//! ```
//!
//! `PIXABAY_API_KEY` overrides `api_key`.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::{handle_message, Message, NewQuery, SessionState};
//!
//! let mut state = SessionState::new(pixsearch::Config::default().search_defaults());
//! let (_, actions) = handle_message(&mut state, &Message::StartNewQuery(NewQuery::text("cats")));
//! assert_eq!(actions.len(), 1);
//! ```

pub mod app;
pub mod domain;
pub mod fetcher;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_message, Action, FetchStatus, Message, SearchSession, SessionState};
pub use domain::{PixsearchError, Result};

use domain::options::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use domain::{Category, Orientation, SearchOptions};
use fetcher::pixabay::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use fetcher::PixabayFetcher;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides `api_key`.
pub const API_KEY_ENV: &str = "PIXABAY_API_KEY";

/// Client configuration, read from `config.toml`.
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pixabay API key.
    pub api_key: Option<String>,

    /// Search endpoint. Default: `https://pixabay.com/api/`
    pub base_url: String,

    /// Records per page, 3..=200. Default: 24
    pub page_size: u32,

    /// Initial category filter. Default: `all`
    pub category: Category,

    /// Initial orientation filter. Default: `horizontal`
    pub orientation: Orientation,

    /// Global request timeout in seconds. Default: 15
    pub timeout_secs: u64,

    /// Tracing level (`trace`, `debug`, `info`, `warn`, `error`). Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let options = SearchOptions::default();
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: options.page_size,
            category: options.category,
            orientation: options.orientation,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PixsearchError::Config`] for malformed TOML, unknown keys or
    /// out-of-range values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixsearch::Config;
    /// use pixsearch::domain::Orientation;
    ///
    /// let config = Config::from_toml("page_size = 40\norientation = \"vertical\"")?;
    /// assert_eq!(config.page_size, 40);
    /// assert_eq!(config.orientation, Orientation::Vertical);
    /// # Ok::<(), pixsearch::PixsearchError>(())
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PixsearchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist,
    /// then applies the `PIXABAY_API_KEY` override.
    ///
    /// # Errors
    ///
    /// Returns [`PixsearchError::Io`] if the file exists but cannot be read,
    /// or [`PixsearchError::Config`] if it does not parse or validate.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            tracing::debug!(path = %path.display(), "loading configuration");
            Self::from_toml(&std::fs::read_to_string(path)?)?
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Self::default()
        };

        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
            config.api_key = Some(key);
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(PixsearchError::Config(format!(
                "page_size must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(PixsearchError::Config("base_url must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(PixsearchError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Initial search options for a new session (empty query, page 1).
    #[must_use]
    pub fn search_defaults(&self) -> SearchOptions {
        SearchOptions {
            category: self.category,
            orientation: self.orientation,
            page_size: self.page_size,
            ..SearchOptions::default()
        }
    }
}

/// Builds the HTTP fetcher described by `config`.
///
/// # Errors
///
/// Returns [`PixsearchError::Config`] when no API key is configured.
pub fn initialize(config: &Config) -> Result<PixabayFetcher> {
    tracing::debug!(base_url = %config.base_url, "initializing pixsearch");

    let api_key = config
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            PixsearchError::Config(format!(
                "missing API key: set api_key in config.toml or {API_KEY_ENV}"
            ))
        })?;

    Ok(PixabayFetcher::new(
        config.base_url.clone(),
        api_key,
        Duration::from_secs(config.timeout_secs),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let err = Config::from_toml("page_size = 500").unwrap_err();
        assert!(matches!(err, PixsearchError::Config(msg) if msg.contains("page_size")));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn search_defaults_carry_filters() {
        let config = Config::from_toml("category = \"vector\"\npage_size = 12").unwrap();
        let options = config.search_defaults();
        assert_eq!(options.category, Category::Vector);
        assert_eq!(options.page_size, 12);
        assert_eq!(options.query, "");
        assert_eq!(options.page, 1);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://localhost:8080/api/\"\ntimeout_secs = 3").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api/");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn initialize_requires_an_api_key() {
        let config = Config {
            api_key: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(matches!(initialize(&config), Err(PixsearchError::Config(_))));
    }
}
