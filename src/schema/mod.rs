//! Stream schema module
//!
//! Schemas are declared as a tree of typed [`Field`]s and rendered to JSON
//! Schema for `SCHEMA` messages and the discovery catalog.
//!
//! # Example
//!
//! ```
//! use tap_getresponse::schema::{Field, JsonSchema};
//!
//! let schema = JsonSchema::from_fields(&[
//!     Field::string("campaignId").required(),
//!     Field::datetime("createdOn").describe("The date of creation"),
//! ]);
//! assert!(schema.is_required("campaignId"));
//! ```

mod fields;
mod types;

pub use fields::{Field, FieldType};
pub use types::{JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};

#[cfg(test)]
mod tests;
