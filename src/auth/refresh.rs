use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use http::Method;
use reqwest::Client;

use crate::auth::cache::TokenCache;
use crate::auth::fetcher::{HttpTokenFetcher, TokenFetcher, TokenRequest};
use crate::auth::lifetime::max_lifetime;
use crate::auth::token::Token;
use crate::auth::{require_non_empty, Authenticator};
use crate::error::{AuthFetchError, ConfigError};
use crate::helpers::time::{Clock, SystemClock};

const AUTHENTICATOR_LABEL: &str = "refresh_token";
const ACCESS_TOKEN_KEY: &str = "access_token";
const EXPIRES_IN_KEY: &str = "expires_in";
const DEFAULT_EXPIRES_IN_SECONDS: i64 = 3600;

/// Access token obtained with an OAuth `refresh_token` grant.
///
/// Unlike [`crate::auth::short_lived::ShortLivedTokenAuthenticator`] the
/// lifetime comes from the `expires_in` field of each response.
pub struct RefreshTokenAuthenticator<F = HttpTokenFetcher, C = SystemClock> {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_url: String,
    fetcher: F,
    clock: C,
    cache: TokenCache,
}

impl RefreshTokenAuthenticator {
    pub fn new(
        client_id: String,
        client_secret: String,
        refresh_token: String,
        token_url: String,
        client: Client,
    ) -> Result<Self, ConfigError> {
        Self::with_collaborators(
            client_id,
            client_secret,
            refresh_token,
            token_url,
            HttpTokenFetcher::new(client),
            SystemClock,
        )
    }
}

impl<F: TokenFetcher, C: Clock> RefreshTokenAuthenticator<F, C> {
    pub fn with_collaborators(
        client_id: String,
        client_secret: String,
        refresh_token: String,
        token_url: String,
        fetcher: F,
        clock: C,
    ) -> Result<Self, ConfigError> {
        require_non_empty("client_id", &client_id)?;
        require_non_empty("client_secret", &client_secret)?;
        require_non_empty("refresh_token", &refresh_token)?;
        require_non_empty("token_url", &token_url)?;

        Ok(Self {
            client_id,
            client_secret,
            refresh_token,
            token_url,
            fetcher,
            clock,
            cache: TokenCache::new(),
        })
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

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
        let request = TokenRequest::new(Method::POST, self.token_url.as_str())
            .basic_auth(self.client_id.as_str(), self.client_secret.as_str())
            .form_field("grant_type", "refresh_token")
            .form_field("refresh_token", self.refresh_token.as_str());
        let body = self.fetcher.fetch(request).await?;

        let value = body
            .get(ACCESS_TOKEN_KEY)
            .and_then(|value| value.as_str())
            .ok_or_else(|| AuthFetchError::MalformedResponse { key: ACCESS_TOKEN_KEY.to_owned() })?;
        let expires_in = body
            .get(EXPIRES_IN_KEY)
            .and_then(|value| value.as_i64())
            .filter(|seconds| *seconds > 0)
            .unwrap_or(DEFAULT_EXPIRES_IN_SECONDS);
        // out-of-range hints are capped like configured lifetimes
        let lifetime = Duration::try_seconds(expires_in)
            .map_or_else(max_lifetime, |lifetime| lifetime.min(max_lifetime()));

        Ok(Token::new(value.to_owned(), now, lifetime))
    }
}

impl<F: TokenFetcher, C: Clock> Authenticator for RefreshTokenAuthenticator<F, C> {
    async fn authorization(&self) -> Result<String, AuthFetchError> {
        self.token().await
    }
}
