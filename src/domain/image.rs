//! Raw API records and their normalized gallery shape.
//!
//! The image API returns loosely-typed JSON. [`RawRecord`] accepts anything the
//! server sends (every field optional, unknown fields ignored) and
//! [`normalize`] reduces it to the [`GalleryImage`] the gallery renders.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One hit as returned by the image API.
///
/// Only the fields the gallery needs are captured. Each is kept as a raw JSON
/// value so that a wrongly-typed field degrades instead of failing the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "webformatURL")]
    pub webformat_url: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
}

/// Display shape of a gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub thumbnail_url: String,
    pub tags: String,
}

impl From<&RawRecord> for GalleryImage {
    fn from(record: &RawRecord) -> Self {
        Self {
            id: id_text(record.id.as_ref()),
            thumbnail_url: string_or_empty(record.webformat_url.as_ref()),
            tags: string_or_empty(record.tags.as_ref()),
        }
    }
}

/// Maps raw records to gallery entries, preserving order.
///
/// Total: never fails, missing or mistyped fields become empty strings.
#[must_use]
pub fn normalize(records: &[RawRecord]) -> Vec<GalleryImage> {
    records.iter().map(GalleryImage::from).collect()
}

/// Ids are numeric on the wire but some mirrors send strings.
fn id_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn string_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}
