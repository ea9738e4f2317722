//! Parent record → child context projection

use super::types::StreamContext;
use crate::types::{JsonValue, Record};

/// Projects the key fields of a parent record into a child context
///
/// Each entry maps a (possibly dotted) field path in the parent record to the
/// placeholder name the child's path template uses. Fields missing from the
/// record are left out of the context, so the child's request build fails
/// with a missing-context error instead of issuing a bad request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextProjection {
    fields: Vec<(String, String)>,
}

impl ContextProjection {
    /// Copy one field under the same name
    pub fn key(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            fields: vec![(field.clone(), field)],
        }
    }

    /// Copy `source` from the record into the context as `target`
    pub fn field(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            fields: vec![(source.into(), target.into())],
        }
    }

    /// Add another field to the projection
    #[must_use]
    pub fn and(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.fields.push((source.into(), target.into()));
        self
    }

    /// Context keys this projection produces
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, target)| target.as_str())
    }

    /// Build the child context for one parent record
    pub fn project(&self, record: &Record) -> StreamContext {
        let mut context = StreamContext::new();
        for (source, target) in &self.fields {
            if let Some(value) = extract_path(record, source) {
                if !value.is_null() {
                    context.insert(target.clone(), value.clone());
                }
            }
        }
        context
    }
}

/// Look up a dotted path (`"campaign.campaignId"`) in a record
pub fn extract_path<'a>(record: &'a Record, path: &str) -> Option<&'a JsonValue> {
    let mut parts = path.split('.');
    let mut current = record.get(parts.next()?)?;
    for part in parts {
        current = current.get(part)?;
    }
    Some(current)
}
