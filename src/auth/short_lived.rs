use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use http::Method;
use reqwest::Client;

use crate::auth::cache::TokenCache;
use crate::auth::fetcher::{HttpTokenFetcher, TokenFetcher, TokenRequest};
use crate::auth::lifetime::parse_lifetime;
use crate::auth::token::Token;
use crate::auth::{require_non_empty, Authenticator};
use crate::error::{AuthFetchError, ConfigError};
use crate::helpers::time::{Clock, SystemClock};

const AUTHENTICATOR_LABEL: &str = "short_lived";

pub const DEFAULT_TOKEN_KEY: &str = "access_token";
pub const DEFAULT_LIFETIME: &str = "PT3600S";

/// Raw settings, validated by [`ShortLivedTokenAuthenticator::with_collaborators`].
#[derive(Debug, Clone)]
pub struct ShortLivedTokenSettings {
    pub client_id: String,
    pub secret_key: String,
    pub url: String,
    pub method: Method,
    pub token_key: String,
    /// ISO-8601 duration, e.g. `PT3600S`.
    pub lifetime: String,
}

impl ShortLivedTokenSettings {
    pub fn new(
        client_id: impl Into<String>,
        secret_key: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            secret_key: secret_key.into(),
            url: url.into(),
            method: Method::GET,
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            lifetime: DEFAULT_LIFETIME.to_owned(),
        }
    }
}

/// Bearer token from an auth endpoint, cached for a fixed configured lifetime.
///
/// Credentials go out as HTTP Basic auth. The configured lifetime is
/// authoritative: expiry hints in the response are ignored.
pub struct ShortLivedTokenAuthenticator<F = HttpTokenFetcher, C = SystemClock> {
    client_id: String,
    secret_key: String,
    url: String,
    method: Method,
    token_key: String,
    lifetime: Duration,
    fetcher: F,
    clock: C,
    cache: TokenCache,
}

impl ShortLivedTokenAuthenticator {
    pub fn new(settings: ShortLivedTokenSettings, client: Client) -> Result<Self, ConfigError> {
        Self::with_collaborators(settings, HttpTokenFetcher::new(client), SystemClock)
    }
}

impl<F: TokenFetcher, C: Clock> ShortLivedTokenAuthenticator<F, C> {
    /// Fails fast on empty credentials or an unparseable lifetime.
    pub fn with_collaborators(
        settings: ShortLivedTokenSettings,
        fetcher: F,
        clock: C,
    ) -> Result<Self, ConfigError> {
        require_non_empty("client_id", &settings.client_id)?;
        require_non_empty("secret_key", &settings.secret_key)?;
        require_non_empty("url", &settings.url)?;
        require_non_empty("token_key", &settings.token_key)?;
        let lifetime = parse_lifetime(&settings.lifetime)?;

        Ok(Self {
            client_id: settings.client_id,
            secret_key: settings.secret_key,
            url: settings.url,
            method: settings.method,
            token_key: settings.token_key,
            lifetime,
            fetcher,
            clock,
            cache: TokenCache::new(),
        })
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `"Bearer <token>"`, refreshing the cached token when it has expired.
    pub async fn token(&self) -> Result<String, AuthFetchError> {
        let now = self.clock.now();
        let token = self
            .cache
            .get_or_refresh(AUTHENTICATOR_LABEL, now, || self.fetch_token(now))
            .await?;
        Ok(token.bearer())
    }

    pub async fn cached_token(&self) -> Option<Arc<Token>> {
        self.cache.current().await
    }

    async fn fetch_token(&self, now: DateTime<Utc>) -> Result<Token, AuthFetchError> {
        let request = TokenRequest::new(self.method.clone(), self.url.as_str())
            .basic_auth(self.client_id.as_str(), self.secret_key.as_str());
        let body = self.fetcher.fetch(request).await?;

        let value = body
            .get(&self.token_key)
            .and_then(|value| value.as_str())
            .ok_or_else(|| AuthFetchError::MalformedResponse { key: self.token_key.clone() })?;

        Ok(Token::new(value.to_owned(), now, self.lifetime))
    }
}

impl<F: TokenFetcher, C: Clock> Authenticator for ShortLivedTokenAuthenticator<F, C> {
    async fn authorization(&self) -> Result<String, AuthFetchError> {
        self.token().await
    }
}
