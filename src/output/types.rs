//! Singer message types

use crate::stream::StreamDescriptor;
use crate::types::{JsonValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of tap output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum SingerMessage {
    Schema {
        stream: String,
        schema: JsonValue,
        key_properties: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        bookmark_properties: Vec<String>,
    },
    Record {
        stream: String,
        record: Record,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_extracted: Option<DateTime<Utc>>,
    },
    State {
        value: JsonValue,
    },
}

impl SingerMessage {
    /// Schema message for a stream
    pub fn schema(descriptor: &StreamDescriptor) -> Self {
        Self::Schema {
            stream: descriptor.name().to_string(),
            schema: descriptor.schema().to_json(),
            key_properties: descriptor.primary_keys().to_vec(),
            bookmark_properties: descriptor
                .replication_key()
                .map(|key| vec![key.to_string()])
                .unwrap_or_default(),
        }
    }

    /// Record message stamped with the current time
    pub fn record(stream: impl Into<String>, record: Record) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Some(Utc::now()),
        }
    }

    /// State message
    pub fn state(value: JsonValue) -> Self {
        Self::State { value }
    }

    /// Stream the message belongs to (none for state)
    pub fn stream(&self) -> Option<&str> {
        match self {
            Self::Schema { stream, .. } | Self::Record { stream, .. } => Some(stream),
            Self::State { .. } => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }
}
