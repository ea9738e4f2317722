//! Stream descriptor and builder

use crate::context::{ContextProjection, StreamContext};
use crate::decode::RecordShape;
use crate::error::{Error, Result};
use crate::schema::{Field, JsonSchema};
use crate::template;
use crate::types::Record;
use std::sync::Arc;

/// Per-record transformation applied before a record is emitted
///
/// Returning `None` drops the record.
pub type PostProcessor = fn(Record, &StreamContext) -> Option<Record>;

/// Emit the record unchanged
pub fn passthrough(record: Record, _context: &StreamContext) -> Option<Record> {
    Some(record)
}

/// Copy every context value into the record, overwriting payload values
pub fn inject_context(mut record: Record, context: &StreamContext) -> Option<Record> {
    for (key, value) in context.iter() {
        record.insert(key.clone(), value.clone());
    }
    Some(record)
}

/// Immutable definition of one stream
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    name: String,
    path: String,
    description: Option<String>,
    primary_keys: Vec<String>,
    replication_key: Option<String>,
    parent: Option<Arc<StreamDescriptor>>,
    record_shape: RecordShape,
    child_context: Option<ContextProjection>,
    post_process: PostProcessor,
    schema: JsonSchema,
}

impl StreamDescriptor {
    /// Start building a descriptor
    pub fn builder(name: impl Into<String>, path: impl Into<String>) -> StreamDescriptorBuilder {
        StreamDescriptorBuilder::new(name, path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path template relative to the base URL, e.g. `/contacts/{contactId}`
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    pub fn replication_key(&self) -> Option<&str> {
        self.replication_key.as_deref()
    }

    pub fn parent(&self) -> Option<&Arc<StreamDescriptor>> {
        self.parent.as_ref()
    }

    /// Name of the parent stream, if any
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref().map(StreamDescriptor::name)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn record_shape(&self) -> &RecordShape {
        &self.record_shape
    }

    /// Projection from this stream's records to its children's context
    pub fn child_context(&self) -> Option<&ContextProjection> {
        self.child_context.as_ref()
    }

    pub fn schema(&self) -> &JsonSchema {
        &self.schema
    }

    /// Apply the post-processor to one record
    pub fn post_process(&self, record: Record, context: &StreamContext) -> Option<Record> {
        (self.post_process)(record, context)
    }

    /// Derive the context a child stream receives from one of our records
    pub fn project_child_context(&self, record: &Record) -> StreamContext {
        self.child_context
            .as_ref()
            .map(|projection| projection.project(record))
            .unwrap_or_default()
    }
}

/// Builder for [`StreamDescriptor`]
///
/// `build` checks the wiring: a root stream may not use placeholders, and
/// every placeholder of a child stream must be produced by the parent's
/// context projection.
#[derive(Debug)]
pub struct StreamDescriptorBuilder {
    name: String,
    path: String,
    description: Option<String>,
    primary_keys: Vec<String>,
    replication_key: Option<String>,
    parent: Option<Arc<StreamDescriptor>>,
    record_shape: RecordShape,
    child_context: Option<ContextProjection>,
    post_process: PostProcessor,
    inject_parent_keys: bool,
    fields: Vec<Field>,
}

impl StreamDescriptorBuilder {
    fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            description: None,
            primary_keys: Vec::new(),
            replication_key: None,
            parent: None,
            record_shape: RecordShape::Array,
            child_context: None,
            post_process: passthrough,
            inject_parent_keys: false,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a primary key field
    #[must_use]
    pub fn primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_keys.push(key.into());
        self
    }

    #[must_use]
    pub fn replication_key(mut self, key: impl Into<String>) -> Self {
        self.replication_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn parent(mut self, parent: &Arc<StreamDescriptor>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    #[must_use]
    pub fn shape(mut self, shape: RecordShape) -> Self {
        self.record_shape = shape;
        self
    }

    /// Context this stream's records provide to its children
    #[must_use]
    pub fn child_context(mut self, projection: ContextProjection) -> Self {
        self.child_context = Some(projection);
        self
    }

    #[must_use]
    pub fn post_process(mut self, post_process: PostProcessor) -> Self {
        self.post_process = post_process;
        self
    }

    /// Inject the parent context into every record and declare the keys in the schema
    #[must_use]
    pub fn inject_context(mut self) -> Self {
        self.post_process = inject_context;
        self.inject_parent_keys = true;
        self
    }

    /// Declare the schema fields
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Validate and build the descriptor
    pub fn build(self) -> Result<StreamDescriptor> {
        if self.name.trim().is_empty() {
            return Err(Error::config("stream name must not be empty"));
        }
        if !self.path.starts_with('/') {
            return Err(Error::invalid_value(
                format!("{}.path", self.name),
                format!("'{}' must start with '/'", self.path),
            ));
        }

        let placeholders = template::placeholders(&self.path);
        match &self.parent {
            None if !placeholders.is_empty() => {
                return Err(Error::config(format!(
                    "root stream '{}' has placeholders in path '{}'",
                    self.name, self.path
                )));
            }
            None => {}
            Some(parent) => {
                let provided: Vec<&str> = parent
                    .child_context()
                    .map(|projection| projection.keys().collect())
                    .unwrap_or_default();
                if let Some(missing) = placeholders
                    .iter()
                    .find(|placeholder| !provided.contains(&placeholder.as_str()))
                {
                    return Err(Error::config(format!(
                        "stream '{}' needs '{missing}' but parent '{}' does not provide it",
                        self.name,
                        parent.name()
                    )));
                }
            }
        }

        let mut schema = JsonSchema::from_fields(&self.fields);
        if self.inject_parent_keys {
            if let Some(projection) = self.parent.as_ref().and_then(|p| p.child_context()) {
                for key in projection.keys() {
                    schema.ensure_string_property(key);
                }
            }
        }

        Ok(StreamDescriptor {
            name: self.name,
            path: self.path,
            description: self.description,
            primary_keys: self.primary_keys,
            replication_key: self.replication_key,
            parent: self.parent,
            record_shape: self.record_shape,
            child_context: self.child_context,
            post_process: self.post_process,
            schema,
        })
    }
}
