//! Search parameters sent with every page request.
//!
//! [`SearchOptions`] is an immutable snapshot: the session clones it into each
//! fetch job, so later edits never leak into a request that is already running.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Smallest page size accepted by the image API.
pub const MIN_PAGE_SIZE: u32 = 3;

/// Largest page size accepted by the image API.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Image category filter, sent to the API as `image_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Photo,
    Illustration,
    Vector,
}

impl Category {
    /// Wire value for the `image_type` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Photo => "photo",
            Self::Illustration => "illustration",
            Self::Vector => "vector",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "photo" => Ok(Self::Photo),
            "illustration" => Ok(Self::Illustration),
            "vector" => Ok(Self::Vector),
            other => Err(format!("unknown category '{other}' (expected all, photo, illustration, vector)")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image orientation filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    All,
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Wire value for the `orientation` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(format!("unknown orientation '{other}' (expected all, horizontal, vertical)")),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a single page request.
///
/// `page` is 1-based. An empty `query` means "nothing to search yet" and never
/// produces a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub query: String,
    pub category: Category,
    pub orientation: Orientation,
    pub page_size: u32,
    pub page: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: Category::default(),
            orientation: Orientation::default(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl SearchOptions {
    /// Returns the query parameters for this request, in wire order.
    ///
    /// The API key is not part of the snapshot; the fetcher adds it.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("image_type", self.category.as_str().to_string()),
            ("orientation", self.orientation.as_str().to_string()),
            ("per_page", self.page_size.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_gallery_settings() {
        let options = SearchOptions::default();
        assert_eq!(options.query, "");
        assert_eq!(options.category, Category::All);
        assert_eq!(options.orientation, Orientation::Horizontal);
        assert_eq!(options.page_size, 24);
        assert_eq!(options.page, 1);
    }

    #[test]
    fn filters_parse_case_insensitively() {
        assert_eq!("Vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert_eq!(" PHOTO ".parse::<Category>(), Ok(Category::Photo));
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn query_pairs_carry_every_parameter() {
        let options = SearchOptions {
            query: "red fox".to_string(),
            category: Category::Vector,
            orientation: Orientation::Vertical,
            page_size: 12,
            page: 3,
        };
        let pairs = options.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("q", "red fox".to_string()),
                ("image_type", "vector".to_string()),
                ("orientation", "vertical".to_string()),
                ("per_page", "12".to_string()),
                ("page", "3".to_string()),
            ]
        );
    }
}
