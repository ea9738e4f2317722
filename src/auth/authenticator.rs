//! Authenticator implementation

use super::types::AuthConfig;
use reqwest::RequestBuilder;

/// Header carrying the GetResponse API key
pub const GETRESPONSE_AUTH_HEADER: &str = "X-Auth-Token";

/// Prefix GetResponse expects before the API key
pub const GETRESPONSE_KEY_PREFIX: &str = "api-key ";

/// Applies credentials to outgoing requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Authenticator for the GetResponse API
    pub fn getresponse(token: impl Into<String>) -> Self {
        Self::new(
            AuthConfig::api_key_header(GETRESPONSE_AUTH_HEADER, token)
                .with_prefix(GETRESPONSE_KEY_PREFIX),
        )
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::ApiKey {
                name,
                prefix,
                value,
            } => {
                let val = format!("{}{}", prefix.as_deref().unwrap_or(""), value);
                req.header(name.as_str(), val)
            }
        }
    }

    /// Get the auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
