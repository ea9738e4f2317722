//! Auth configuration types

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// API key sent in a request header
    ApiKey {
        /// Header name
        name: String,
        /// Prefix to add before the value (e.g., "api-key ")
        prefix: Option<String>,
        /// The API key value
        value: String,
    },
}

impl AuthConfig {
    /// API key sent in a header
    pub fn api_key_header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ApiKey {
            name: name.into(),
            prefix: None,
            value: value.into(),
        }
    }

    /// Set the value prefix of an API key config
    #[must_use]
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        match self {
            Self::ApiKey { name, value, .. } => Self::ApiKey {
                name,
                prefix: Some(prefix.into()),
                value,
            },
            other => other,
        }
    }
}

// Secrets never reach logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::ApiKey { name, prefix, .. } => f
                .debug_struct("ApiKey")
                .field("name", name)
                .field("prefix", prefix)
                .field("value", &"[REDACTED]")
                .finish(),
        }
    }
}
