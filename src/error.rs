//! Error types for tap-getresponse
//!
//! This module defines the error hierarchy for the whole tap.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for tap-getresponse
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Malformed response for stream '{stream}': {message}")]
    MalformedResponse { stream: String, message: String },

    #[error("Invalid pagination header {header}: '{value}'")]
    PaginationHeader { header: String, value: String },

    #[error("Pagination headers missing on page {page}")]
    MissingPaginationHeaders { page: u32 },

    // ============================================================================
    // Traversal Errors
    // ============================================================================
    #[error("Stream '{stream}' has no context value for placeholder '{key}'")]
    MissingContext { stream: String, key: String },

    #[error("Stream '{stream}' not found in registry")]
    StreamNotFound { stream: String },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing configuration
    Config,
    /// HTTP call failed or returned a non-2xx status
    Transport,
    /// Body could not be parsed into the expected shape
    MalformedResponse,
    /// A path placeholder had no context value
    MissingContext,
    /// Pagination headers were unusable
    Pagination,
    /// State could not be read or written
    State,
    /// Local I/O failure
    Io,
    /// Anything else
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(stream: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            stream: stream.into(),
            message: message.into(),
        }
    }

    /// Create a pagination header error
    pub fn pagination_header(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self::PaginationHeader {
            header: header.into(),
            value: value.into(),
        }
    }

    /// Create a missing context error
    pub fn missing_context(stream: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingContext {
            stream: stream.into(),
            key: key.into(),
        }
    }

    /// Create a stream not found error
    pub fn stream_not_found(stream: impl Into<String>) -> Self {
        Self::StreamNotFound {
            stream: stream.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::JsonParse(_)
            | Error::InvalidUrl(_)
            | Error::StreamNotFound { .. } => ErrorKind::Config,
            Error::Http(_) | Error::HttpStatus { .. } => ErrorKind::Transport,
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::PaginationHeader { .. } | Error::MissingPaginationHeaders { .. } => {
                ErrorKind::Pagination
            }
            Error::MissingContext { .. } => ErrorKind::MissingContext,
            Error::State { .. } => ErrorKind::State,
            Error::Io(_) => ErrorKind::Io,
            Error::Other(_) => ErrorKind::Other,
        }
    }
}

/// Result type alias for tap-getresponse
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
