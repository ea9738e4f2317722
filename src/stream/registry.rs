//! Registry of stream descriptors

use super::descriptor::StreamDescriptor;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Streams keyed by name, in registration order
///
/// Parents must be registered before their children.
#[derive(Debug, Clone, Default)]
pub struct StreamRegistry {
    streams: Vec<Arc<StreamDescriptor>>,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor and return the shared handle
    pub fn register(&mut self, descriptor: StreamDescriptor) -> Result<Arc<StreamDescriptor>> {
        if self.get(descriptor.name()).is_some() {
            return Err(Error::config(format!(
                "stream '{}' is registered twice",
                descriptor.name()
            )));
        }
        if let Some(parent) = descriptor.parent_name() {
            if self.get(parent).is_none() {
                return Err(Error::stream_not_found(parent));
            }
        }

        let descriptor = Arc::new(descriptor);
        self.streams.push(Arc::clone(&descriptor));
        Ok(descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<StreamDescriptor>> {
        self.streams.iter().find(|s| s.name() == name)
    }

    /// Like [`get`](Self::get) but fails with `StreamNotFound`
    pub fn require(&self, name: &str) -> Result<&Arc<StreamDescriptor>> {
        self.get(name).ok_or_else(|| Error::stream_not_found(name))
    }

    /// Streams without a parent
    pub fn roots(&self) -> impl Iterator<Item = &Arc<StreamDescriptor>> {
        self.streams.iter().filter(|s| s.is_root())
    }

    /// Direct children of `name`
    pub fn children_of<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Arc<StreamDescriptor>> + 'a {
        self.streams
            .iter()
            .filter(move |s| s.parent_name() == Some(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<StreamDescriptor>> {
        self.streams.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.streams.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Name of the root of the forest `name` belongs to
    pub fn root_of(&self, name: &str) -> Result<String> {
        let mut current = self.require(name)?;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        Ok(current.name().to_string())
    }

    /// Validate a selection of stream names
    ///
    /// An empty selection selects every stream.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<BTreeSet<String>> {
        if names.is_empty() {
            return Ok(self.streams.iter().map(|s| s.name().to_string()).collect());
        }
        names
            .iter()
            .map(|name| self.require(name.as_ref()).map(|s| s.name().to_string()))
            .collect()
    }

    /// Whether `name` or any of its descendants is in `selected`
    pub fn subtree_selected(&self, name: &str, selected: &BTreeSet<String>) -> bool {
        selected.contains(name)
            || self
                .children_of(name)
                .any(|child| self.subtree_selected(child.name(), selected))
    }
}
