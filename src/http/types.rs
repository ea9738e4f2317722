//! Transport types

use crate::error::Result;
use crate::request::RequestSpec;
use async_trait::async_trait;
use reqwest::header::HeaderMap;

/// A fully read HTTP response
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    /// Create a response with no headers
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value as text (name is case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Performs GET requests for the engine
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue one GET request and read the whole response
    async fn get(&self, request: &RequestSpec) -> Result<HttpResponse>;
}
