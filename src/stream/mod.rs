//! Stream descriptors and the stream registry
//!
//! A [`StreamDescriptor`] is the immutable definition of one API resource:
//! its path template, keys, response shape, parent stream and the projection
//! its own records provide to child streams. Descriptors are shared as
//! `Arc<StreamDescriptor>` and collected in a [`StreamRegistry`], which forms
//! a forest of parent/child chains.

mod descriptor;
mod registry;

pub use descriptor::{inject_context, passthrough, PostProcessor, StreamDescriptor, StreamDescriptorBuilder};
pub use registry::StreamRegistry;

#[cfg(test)]
mod tests;
