use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::config::settings::HttpConfig;
use crate::error::{ConfigError, HttpError};

/// Build the shared reqwest client from settings.
pub fn build_client(http_config: &HttpConfig) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(Duration::from_millis(http_config.timeout_ms))
        .build()
        .map_err(ConfigError::HttpClient)
}

/// Send a prepared request and decode a 2xx JSON body.
pub async fn send_json(request: RequestBuilder, url: &str) -> Result<Value, HttpError> {
    let response = request.send().await.map_err(|source| HttpError::Transport {
        url: url.to_owned(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        debug!(%url, %status, "request rejected");
        return Err(HttpError::Status { url: url.to_owned(), status });
    }

    let body = response.text().await.map_err(|source| HttpError::Transport {
        url: url.to_owned(),
        source,
    })?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|source| HttpError::InvalidBody {
        url: url.to_owned(),
        source,
    })
}
