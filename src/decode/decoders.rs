//! Decoder implementations

use super::types::{RecordDecoder, RecordShape};
use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder for one stream's response shape
#[derive(Debug, Clone)]
pub struct JsonDecoder {
    stream: String,
    shape: RecordShape,
}

impl JsonDecoder {
    /// Create a decoder; `stream` is only used in error messages
    pub fn new(stream: impl Into<String>, shape: RecordShape) -> Self {
        Self {
            stream: stream.into(),
            shape,
        }
    }

    /// The shape this decoder expects
    pub fn shape(&self) -> &RecordShape {
        &self.shape
    }

    fn extract_records(&self, value: JsonValue) -> Result<Vec<Record>> {
        match (&self.shape, value) {
            (RecordShape::Array, JsonValue::Array(items)) => self.collect_objects(items),
            (RecordShape::Object, JsonValue::Object(obj)) => Ok(vec![obj]),
            (RecordShape::WrappedArray { .. }, JsonValue::Array(items)) => {
                self.collect_objects(items)
            }
            (RecordShape::WrappedArray { field }, JsonValue::Object(mut obj)) => {
                match obj.remove(field) {
                    Some(JsonValue::Array(items)) => self.collect_objects(items),
                    _ => Err(Error::malformed(
                        &self.stream,
                        format!("expected a JSON array or an object with an '{field}' array"),
                    )),
                }
            }
            (shape, other) => Err(Error::malformed(
                &self.stream,
                format!("expected {}, got {}", describe_shape(shape), describe_value(&other)),
            )),
        }
    }

    fn collect_objects(&self, items: Vec<JsonValue>) -> Result<Vec<Record>> {
        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                JsonValue::Object(obj) => Ok(obj),
                other => Err(Error::malformed(
                    &self.stream,
                    format!("element {idx} is {}, expected an object", describe_value(&other)),
                )),
            })
            .collect()
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Record>> {
        let value: JsonValue = serde_json::from_str(body)
            .map_err(|e| Error::malformed(&self.stream, format!("invalid JSON: {e}")))?;
        self.extract_records(value)
    }
}

/// Parse a response body of the given shape
pub fn parse(body: &str, shape: &RecordShape, stream: &str) -> Result<Vec<Record>> {
    JsonDecoder::new(stream, shape.clone()).decode(body)
}

fn describe_shape(shape: &RecordShape) -> &'static str {
    match shape {
        RecordShape::Array | RecordShape::WrappedArray { .. } => "a JSON array",
        RecordShape::Object => "a JSON object",
    }
}

fn describe_value(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
