//! Authenticators producing `Authorization` header values.
//!
//! - `short_lived`: client credentials exchanged for a bearer token that is
//!   cached for a configured ISO-8601 lifetime
//! - `refresh`: OAuth refresh-token grant, cached for the returned `expires_in`
//! - `ApiKeyAuthenticator`: static key with a scheme prefix

use std::future::Future;

use crate::error::{AuthFetchError, ConfigError};

pub mod cache;
pub mod fetcher;
pub mod lifetime;
pub mod refresh;
pub mod short_lived;
pub mod token;

/// Yields the value for the `Authorization` header of an outgoing request.
pub trait Authenticator: Send + Sync {
    fn authorization(&self) -> impl Future<Output = Result<String, AuthFetchError>> + Send;
}

/// `"<scheme> <key>"`, never touches the network.
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    scheme: String,
    api_key: String,
}

impl ApiKeyAuthenticator {
    pub fn new(scheme: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        require_non_empty("api_key", &api_key)?;
        Ok(Self { scheme: scheme.into(), api_key })
    }

    pub fn header_value(&self) -> String {
        format!("{} {}", self.scheme, self.api_key)
    }
}

impl Authenticator for ApiKeyAuthenticator {
    async fn authorization(&self) -> Result<String, AuthFetchError> {
        Ok(self.header_value())
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingValue { field: field.to_owned() });
    }
    Ok(())
}
