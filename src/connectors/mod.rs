//! Connectors module
//!
//! Defines all supported connectors and provides a factory to build them from config.

use std::fmt::Display;
use std::future::Future;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::connectors::ConnectorConfig;
use crate::error::{ConfigError, ConnectorError, HttpError};
use crate::observability::metrics::get_metrics;
use crate::utils::http_client::send_json;

pub mod klaviyo;
pub mod pinterest;
pub mod railz;

use klaviyo::KlaviyoConnector;
use pinterest::PinterestConnector;
use railz::RailzConnector;

/// Outcome of a connection check that did not fail hard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: Option<String>,
}

impl ConnectionStatus {
    pub fn succeeded() -> Self {
        Self { success: true, message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()) }
    }

    pub fn as_tuple(&self) -> (bool, Option<&str>) {
        (self.success, self.message.as_deref())
    }
}

/// A readable stream exposed by a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamDescriptor {
    pub name: &'static str,
    /// request path relative to the connector's base URL
    pub path: &'static str,
    pub primary_key: &'static str,
}

impl StreamDescriptor {
    pub const fn new(name: &'static str, path: &'static str, primary_key: &'static str) -> Self {
        Self { name, path, primary_key }
    }
}

pub trait Connector: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok` with a failed status for unreachable or rejecting upstreams,
    /// `Err` for problems the user has to fix in the config.
    fn check_connection(
        &self,
    ) -> impl Future<Output = Result<ConnectionStatus, ConnectorError>> + Send;

    fn streams(&self) -> Vec<StreamDescriptor>;
}

pub enum ConnectorKind {
    Klaviyo(KlaviyoConnector),
    Pinterest(PinterestConnector),
    Railz(RailzConnector),
}

impl ConnectorKind {
    pub fn name(&self) -> &str {
        match self {
            ConnectorKind::Klaviyo(c) => c.name(),
            ConnectorKind::Pinterest(c) => c.name(),
            ConnectorKind::Railz(c) => c.name(),
        }
    }

    pub fn streams(&self) -> Vec<StreamDescriptor> {
        match self {
            ConnectorKind::Klaviyo(c) => c.streams(),
            ConnectorKind::Pinterest(c) => c.streams(),
            ConnectorKind::Railz(c) => c.streams(),
        }
    }

    pub async fn check_connection(&self) -> Result<ConnectionStatus, ConnectorError> {
        let result = match self {
            ConnectorKind::Klaviyo(c) => c.check_connection().await,
            ConnectorKind::Pinterest(c) => c.check_connection().await,
            ConnectorKind::Railz(c) => c.check_connection().await,
        };

        let outcome = match &result {
            Ok(status) if status.success => "succeeded",
            Ok(_) => "failed",
            Err(_) => "error",
        };
        get_metrics()
            .await
            .connection_checks
            .with_label_values(&[self.name(), outcome])
            .inc();
        info!(connector = self.name(), outcome, "connection check finished");
        result
    }
}

pub fn build_connector(
    name: &str,
    cfg: &ConnectorConfig,
    client: &Client,
) -> Result<ConnectorKind, ConfigError> {
    let connector = match cfg {
        ConnectorConfig::Klaviyo(c) => {
            ConnectorKind::Klaviyo(KlaviyoConnector::new(name, c, client.clone())?)
        }
        ConnectorConfig::Pinterest(c) => {
            ConnectorKind::Pinterest(PinterestConnector::new(name, c, client.clone())?)
        }
        ConnectorConfig::Railz(c) => {
            ConnectorKind::Railz(RailzConnector::new(name, c, client.clone())?)
        }
    };
    Ok(connector)
}

/// Failed status in the form `Unable to connect to stream <stream> - <error>`.
pub(crate) fn unable_to_connect(stream: &str, err: &impl Display) -> ConnectionStatus {
    warn!(stream, error = %err, "connection check failed");
    ConnectionStatus::failed(format!("Unable to connect to stream {} - {}", stream, err))
}

pub(crate) async fn get_json(
    client: &Client,
    url: &str,
    headers: &[(&str, &str)],
) -> Result<Value, HttpError> {
    let mut request = client.get(url).header(http::header::ACCEPT, "application/json");
    for (key, value) in headers {
        request = request.header(*key, *value);
    }
    send_json(request, url).await
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
