//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Complete tap state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream bookmarks
    #[serde(default)]
    pub bookmarks: BTreeMap<String, Bookmark>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the bookmark of a stream
    pub fn get_bookmark(&self, stream: &str) -> Option<&Bookmark> {
        self.bookmarks.get(stream)
    }

    /// Move a stream's bookmark forward to `value`
    ///
    /// Returns true when the bookmark changed. Values that do not compare
    /// greater than the current one are ignored.
    pub fn advance(&mut self, stream: &str, replication_key: &str, value: &JsonValue) -> bool {
        let bookmark = self
            .bookmarks
            .entry(stream.to_string())
            .or_insert_with(|| Bookmark::new(replication_key));

        if bookmark.replication_key != replication_key {
            // Key changed between runs, the old value is meaningless.
            *bookmark = Bookmark::new(replication_key);
        }
        bookmark.advance(value)
    }

    /// Drop the bookmark of a stream
    pub fn clear_stream(&mut self, stream: &str) {
        self.bookmarks.remove(stream);
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

/// Replication bookmark of one stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub replication_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key_value: Option<JsonValue>,
}

impl Bookmark {
    /// Create an empty bookmark
    pub fn new(replication_key: impl Into<String>) -> Self {
        Self {
            replication_key: replication_key.into(),
            replication_key_value: None,
        }
    }

    /// Keep the greater of the current and the given value
    pub fn advance(&mut self, value: &JsonValue) -> bool {
        if value.is_null() {
            return false;
        }
        let newer = match &self.replication_key_value {
            None => true,
            Some(current) => {
                compare_replication_values(value, current) == Some(Ordering::Greater)
            }
        };
        if newer {
            self.replication_key_value = Some(value.clone());
        }
        newer
    }
}

/// Order two replication values
///
/// Numbers compare numerically and strings lexically (ISO 8601 timestamps
/// sort correctly). Mixed or structured values are unordered.
pub fn compare_replication_values(a: &JsonValue, b: &JsonValue) -> Option<Ordering> {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (JsonValue::String(x), JsonValue::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
