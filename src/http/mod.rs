//! HTTP transport module
//!
//! The engine talks to the API through the [`HttpTransport`] trait. The
//! production implementation is [`HttpClient`] (reqwest); tests drive the
//! engine with scripted transports.
//!
//! Transport failures are surfaced as errors and never retried. Status codes
//! are not interpreted here; the caller decides what a non-2xx status means.

mod client;
mod types;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use types::{HttpResponse, HttpTransport};

#[cfg(test)]
mod tests;
