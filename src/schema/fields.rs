//! Declarative field specifications

use super::types::{JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};
use serde_json::Value;
use std::collections::BTreeMap;

/// Type of a declared field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    /// String in ISO 8601 date-time format
    DateTime,
    /// String holding a URI
    Uri,
    /// String holding an email address
    Email,
    /// Nested object with its own fields
    Object(Vec<Field>),
    /// Array of the given item type
    Array(Box<FieldType>),
}

impl FieldType {
    /// Object type from a list of fields
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::Object(fields.into_iter().collect())
    }

    /// Array type of the given item type
    pub fn array_of(item: FieldType) -> Self {
        Self::Array(Box::new(item))
    }

    fn json_type(&self) -> JsonType {
        match self {
            Self::String | Self::DateTime | Self::Uri | Self::Email => JsonType::String,
            Self::Integer => JsonType::Integer,
            Self::Number => JsonType::Number,
            Self::Boolean => JsonType::Boolean,
            Self::Object(_) => JsonType::Object,
            Self::Array(_) => JsonType::Array,
        }
    }

    fn format(&self) -> Option<&'static str> {
        match self {
            Self::DateTime => Some("date-time"),
            Self::Uri => Some("uri"),
            Self::Email => Some("email"),
            _ => None,
        }
    }

    /// Render as a JSON Schema property
    pub fn to_property(&self, nullable: bool) -> SchemaProperty {
        let json_type = self.json_type();
        let mut property = if nullable {
            SchemaProperty::nullable(json_type)
        } else {
            SchemaProperty::new(json_type)
        };
        property.format = self.format().map(str::to_string);

        match self {
            Self::Object(fields) => {
                let (properties, required) = render_fields(fields);
                property.properties = Some(properties);
                if !required.is_empty() {
                    property.required = Some(required);
                }
            }
            // Array items are nullable like any optional value
            Self::Array(item) => property.items = Some(Box::new(item.to_property(true))),
            _ => {}
        }
        property
    }
}

/// One named, typed field of a stream schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub description: Option<String>,
    pub allowed_values: Option<Vec<Value>>,
}

impl Field {
    /// Create an optional field of the given type
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            description: None,
            allowed_values: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::DateTime)
    }

    pub fn uri(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Uri)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Email)
    }

    /// Nested object field
    pub fn object(name: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self::new(name, FieldType::object(fields))
    }

    /// Array field with the given item type
    pub fn array(name: impl Into<String>, item: FieldType) -> Self {
        Self::new(name, FieldType::array_of(item))
    }

    /// Mark the field as required (and non-nullable)
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the description
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the field to a fixed set of values
    #[must_use]
    pub fn allowed<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Render as a JSON Schema property
    pub fn to_property(&self) -> SchemaProperty {
        let mut property = self.field_type.to_property(!self.required);
        property.description.clone_from(&self.description);
        property.enum_values.clone_from(&self.allowed_values);
        property
    }
}

fn render_fields(fields: &[Field]) -> (BTreeMap<String, SchemaProperty>, Vec<String>) {
    let properties = fields
        .iter()
        .map(|field| (field.name.clone(), field.to_property()))
        .collect();
    let required = fields
        .iter()
        .filter(|field| field.required)
        .map(|field| field.name.clone())
        .collect();
    (properties, required)
}

impl JsonSchema {
    /// Build a stream schema from declared fields
    pub fn from_fields(fields: &[Field]) -> Self {
        let (properties, required) = render_fields(fields);
        Self {
            json_type: JsonType::Object,
            properties,
            required,
        }
    }

    /// Add an optional string property unless one is already declared
    ///
    /// Used for context keys injected into child records.
    pub fn ensure_string_property(&mut self, name: &str) {
        self.properties
            .entry(name.to_string())
            .or_insert_with(|| SchemaProperty {
                json_type: JsonTypeOrArray::nullable(JsonType::String),
                ..SchemaProperty::new(JsonType::String)
            });
    }
}
