//! Output module
//!
//! Singer message types and the sinks records are written to.
//!
//! # Overview
//!
//! - [`SingerMessage`] - `SCHEMA`, `RECORD` and `STATE` messages
//! - [`RecordSink`] - what the engine emits into
//! - [`SingerWriter`] - JSON lines on any `Write` (stdout in the CLI)
//! - [`CollectingSink`] - keeps messages in memory

mod types;
mod writer;

pub use types::SingerMessage;
pub use writer::{CollectingSink, RecordSink, SingerWriter};

#[cfg(test)]
mod tests;
