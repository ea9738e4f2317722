//! Response decoder module
//!
//! Supports: JSON array, single JSON object, bare array wrapped under a field
//!
//! # Overview
//!
//! The decode module turns a raw response body into a flat sequence of
//! records. The expected layout of the body is declared per stream as a
//! [`RecordShape`].

mod decoders;
mod types;

pub use decoders::{parse, JsonDecoder};
pub use types::{RecordDecoder, RecordShape};
