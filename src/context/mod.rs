//! Stream context module
//!
//! A context is the small key-value mapping a parent record hands down to a
//! child stream, e.g. `{campaignId: "123"}` for `/campaigns/{campaignId}`.
//!
//! # Overview
//!
//! - `StreamContext` - ordered placeholder name → value mapping
//! - `ContextProjection` - pure function from a parent record to a child context

mod projection;
mod types;

pub use projection::{extract_path, ContextProjection};
pub use types::StreamContext;
