//! Tap configuration
//!
//! `TapConfig` is read from a JSON or YAML file (picked by extension) or from
//! an inline JSON string. Only `auth_token` is required, and it may come from
//! the `TAP_GETRESPONSE_AUTH_TOKEN` environment variable instead.

use crate::auth::Authenticator;
use crate::engine::{SyncConfig, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::request::DEFAULT_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable consulted when `auth_token` is absent
pub const AUTH_TOKEN_ENV: &str = "TAP_GETRESPONSE_AUTH_TOKEN";

/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 1000;

/// Configuration of one tap run
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TapConfig {
    /// API key sent as `X-Auth-Token: api-key <token>`
    #[serde(default)]
    pub auth_token: String,

    /// Page size sent as `perPage`
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Overrides the client's default user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fail when a page after the first carries no pagination headers
    #[serde(default)]
    pub strict_pagination: bool,

    /// Streams to sync when none are given on the command line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streams: Vec<String>,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            per_page: default_per_page(),
            user_agent: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            strict_pagination: false,
            streams: Vec::new(),
        }
    }
}

impl fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapConfig")
            .field("auth_token", &"<redacted>")
            .field("per_page", &self.per_page)
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("strict_pagination", &self.strict_pagination)
            .field("streams", &self.streams)
            .finish()
    }
}

impl TapConfig {
    /// Config with the given token and defaults elsewhere
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            ..Self::default()
        }
    }

    /// Load and validate a config file
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, anything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        config.finish()
    }

    /// Load and validate an inline JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.finish()
    }

    /// Config from the environment alone
    pub fn from_env() -> Result<Self> {
        Self::default().finish()
    }

    fn finish(mut self) -> Result<Self> {
        self.apply_env_fallback(|name| std::env::var(name).ok());
        self.validate()?;
        Ok(self)
    }

    /// Fill `auth_token` from `lookup(AUTH_TOKEN_ENV)` when it is empty
    pub fn apply_env_fallback(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.auth_token.trim().is_empty() {
            if let Some(token) = lookup(AUTH_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
                self.auth_token = token;
            }
        }
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        if self.auth_token.trim().is_empty() {
            return Err(Error::missing_field("auth_token"));
        }

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(Error::invalid_value(
                "per_page",
                format!("must be between 1 and {MAX_PER_PAGE}, got {}", self.per_page),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if let Some(agent) = &self.user_agent {
            if agent.trim().is_empty() {
                return Err(Error::invalid_value("user_agent", "must not be blank"));
            }
        }

        Ok(())
    }

    /// Engine settings derived from this config
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig::new()
            .with_base_url(&self.base_url)
            .with_per_page(self.per_page)
            .with_strict_pagination(self.strict_pagination)
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .authenticator(Authenticator::getresponse(&self.auth_token));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}
