use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::token::Token;
use crate::error::AuthFetchError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;

/// Single-slot token cache owned by one authenticator.
///
/// The slot holds an immutable `Arc<Token>` that is swapped on refresh. The
/// lock is held while refreshing, so callers racing on an expired token wait
/// for one request instead of issuing their own.
#[derive(Debug, Default)]
pub struct TokenCache {
    inner: Mutex<Option<Arc<Token>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently cached token, valid or not.
    pub async fn current(&self) -> Option<Arc<Token>> {
        self.inner.lock().await.clone()
    }

    /// Return the cached token if it is valid at `now`, otherwise run `refresh`
    /// and store its result.
    pub async fn get_or_refresh<F, Fut>(
        &self,
        label: &str,
        now: DateTime<Utc>,
        refresh: F,
    ) -> Result<Arc<Token>, AuthFetchError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Token, AuthFetchError>> + Send,
    {
        let metrics = get_metrics().await;
        let mut slot = self.inner.lock().await;

        if let Some(token) = slot.as_ref().filter(|token| token.is_valid_at(now)) {
            metrics.token_cache_hits.with_label_values(&[label]).inc();
            debug!(authenticator = label, expires_at = %token.expires_at(), "serving cached token");
            return Ok(token.clone());
        }

        metrics.token_fetch_requests.with_label_values(&[label]).inc();
        let start = get_instant();
        let fetched = refresh().await;
        metrics
            .token_fetch_duration
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        match fetched {
            Ok(token) => {
                info!(authenticator = label, expires_at = %token.expires_at(), "token refreshed");
                let token = Arc::new(token);
                *slot = Some(token.clone());
                Ok(token)
            }
            Err(err) => {
                metrics
                    .token_fetch_failures
                    .with_label_values(&[label, err.reason()])
                    .inc();
                warn!(authenticator = label, error = %err, "token refresh failed");
                Err(err)
            }
        }
    }
}
