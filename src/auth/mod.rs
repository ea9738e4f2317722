//! Authentication module
//!
//! Supports: API key in a request header
//!
//! GetResponse expects `X-Auth-Token: api-key {token}`, see
//! [`Authenticator::getresponse`].

mod authenticator;
mod types;

pub use authenticator::{Authenticator, GETRESPONSE_AUTH_HEADER, GETRESPONSE_KEY_PREFIX};
pub use types::AuthConfig;
