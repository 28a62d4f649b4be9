#[cfg(test)]
mod test {

    use std::sync::Arc;

    use chrono::Duration;
    use http::Method;
    use serde_json::json;

    use crate::auth::lifetime::max_lifetime;
    use crate::auth::refresh::RefreshTokenAuthenticator;
    use crate::error::ConfigError;
    use crate::tests::common::{at, ManualClock, ScriptedFetcher};

    const TOKEN_URL: &str = "https://api.pinterest.com/v5/oauth/token";

    fn authenticator(
        fetcher: &Arc<ScriptedFetcher>,
        clock: &Arc<ManualClock>,
    ) -> RefreshTokenAuthenticator<Arc<ScriptedFetcher>, Arc<ManualClock>> {
        RefreshTokenAuthenticator::with_collaborators(
            "pin_client".into(),
            "pin_secret".into(),
            "refresh-123".into(),
            TOKEN_URL.into(),
            fetcher.clone(),
            clock.clone(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn refresh_grant_is_posted_as_form() {
        let fetcher = Arc::new(
            ScriptedFetcher::new().respond(json!({"access_token": "pin-access", "expires_in": 600})),
        );
        let clock = Arc::new(ManualClock::new(at(8, 0)));
        let auth = authenticator(&fetcher, &clock);

        assert_eq!(auth.token().await.unwrap(), "Bearer pin-access");
        assert_eq!(auth.refresh_token(), "refresh-123");

        let request = &fetcher.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, TOKEN_URL);
        assert!(request.form.contains(&("grant_type".to_owned(), "refresh_token".to_owned())));
        assert!(request.form.contains(&("refresh_token".to_owned(), "refresh-123".to_owned())));
    }

    #[tokio::test]
    async fn lifetime_follows_expires_in() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .respond(json!({"access_token": "one", "expires_in": 600}))
                .respond(json!({"access_token": "two"})),
        );
        let clock = Arc::new(ManualClock::new(at(8, 0)));
        let auth = authenticator(&fetcher, &clock);

        assert_eq!(auth.token().await.unwrap(), "Bearer one");
        clock.advance(Duration::seconds(599));
        assert_eq!(auth.token().await.unwrap(), "Bearer one");
        clock.advance(Duration::seconds(1));
        assert_eq!(auth.token().await.unwrap(), "Bearer two");

        // no expires_in in the second response
        let cached = auth.cached_token().await.unwrap();
        assert_eq!(cached.lifetime, Duration::seconds(3600));
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn oversized_expires_in_is_capped() {
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).finish(),
        );
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .respond(json!({"access_token": "huge", "expires_in": 9_999_999_999_999_999i64}))
                .respond(json!({"access_token": "large", "expires_in": 9_000_000_000i64})),
        );
        let clock = Arc::new(ManualClock::new(at(8, 0)));
        let auth = authenticator(&fetcher, &clock);

        assert_eq!(auth.token().await.unwrap(), "Bearer huge");
        assert_eq!(auth.token().await.unwrap(), "Bearer huge");
        assert_eq!(auth.cached_token().await.unwrap().lifetime, max_lifetime());

        clock.advance(max_lifetime());
        assert_eq!(auth.token().await.unwrap(), "Bearer large");
        assert_eq!(auth.cached_token().await.unwrap().lifetime, max_lifetime());
        assert_eq!(fetcher.calls(), 2);
    }

    #[test]
    fn empty_refresh_token_is_rejected() {
        let result = RefreshTokenAuthenticator::with_collaborators(
            "pin_client".into(),
            "pin_secret".into(),
            "  ".into(),
            TOKEN_URL.into(),
            Arc::new(ScriptedFetcher::new()),
            Arc::new(ManualClock::new(at(8, 0))),
        );
        assert!(matches!(result, Err(ConfigError::MissingValue { ref field }) if field == "refresh_token"));
    }
}
