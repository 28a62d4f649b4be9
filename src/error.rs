//! Error types shared by authenticators and connectors.

use http::StatusCode;
use thiserror::Error;

/// Failure of a single outgoing HTTP request.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{} for url: {url}", describe_status(.status))]
    Status { url: String, status: StatusCode },

    #[error("response from {url} is not valid JSON: {source}")]
    InvalidBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Renders a status the way upstream APIs are usually quoted in error reports,
/// e.g. `401 Client Error: Unauthorized`.
fn describe_status(status: &StatusCode) -> String {
    let class = if status.is_server_error() {
        "Server Error"
    } else if status.is_client_error() {
        "Client Error"
    } else {
        "Unexpected Status"
    };
    format!(
        "{} {}: {}",
        status.as_u16(),
        class,
        status.canonical_reason().unwrap_or("None")
    )
}

/// Token could not be obtained from the auth endpoint.
#[derive(Debug, Error)]
pub enum AuthFetchError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("malformed response: field '{key}' is missing or not a string")]
    MalformedResponse { key: String },
}

impl AuthFetchError {
    /// Short label used for failure metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthFetchError::Http(HttpError::Transport { .. }) => "transport",
            AuthFetchError::Http(HttpError::Status { .. }) => "status",
            AuthFetchError::Http(HttpError::InvalidBody { .. }) => "invalid_body",
            AuthFetchError::MalformedResponse { .. } => "malformed_response",
        }
    }
}

/// Invalid configuration, detected before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid lifetime '{value}': {reason}")]
    InvalidLifetime { value: String, reason: String },

    #[error("Entered `Start Date` {value} does not match format YYYY-MM-DD")]
    InvalidStartDate { value: String },

    #[error("{field} must not be empty")]
    MissingValue { field: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Hard failure of a connection check. Soft failures are reported through
/// [`crate::connectors::ConnectionStatus`] instead.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid ad_account_id: {account_id}. No data returned from Pinterest API.")]
    InvalidAccount { account_id: String },
}
