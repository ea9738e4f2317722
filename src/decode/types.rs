//! Decoder types and traits

use crate::error::Result;
use crate::types::Record;
use serde::{Deserialize, Serialize};

/// Layout of a response body
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordShape {
    /// A JSON array of objects, one record per element (default)
    #[default]
    Array,
    /// A single JSON object (detail endpoints)
    Object,
    /// A bare JSON array that is wrapped under `field` before its elements
    /// are projected as records
    WrappedArray { field: String },
}

impl RecordShape {
    /// Shorthand for a wrapped array shape
    pub fn wrapped(field: impl Into<String>) -> Self {
        Self::WrappedArray {
            field: field.into(),
        }
    }

    /// Whether responses of this shape can span several pages
    pub fn is_paged(&self) -> bool {
        !matches!(self, Self::Object)
    }
}

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into a list of records
    fn decode(&self, body: &str) -> Result<Vec<Record>>;
}
