use reqwest::Client;

use crate::auth::ApiKeyAuthenticator;
use crate::config::connectors::KlaviyoConfig;
use crate::connectors::{
    get_json, join_url, unable_to_connect, ConnectionStatus, Connector, StreamDescriptor,
};
use crate::error::{ConfigError, ConnectorError};
use crate::utils::constants::KLAVIYO_API_REVISION;

const AUTH_SCHEME: &str = "Klaviyo-API-Key";
const CHECK_STREAM: &str = "metrics";
const CHECK_PATH: &str = "api/metrics";

pub const BAD_REQUEST_MESSAGE: &str = "Bad request. Please check your request parameters.";
pub const INVALID_KEY_MESSAGE: &str =
    "Please provide a valid API key and make sure it has permissions to read specified streams.";

const STREAMS: [StreamDescriptor; 11] = [
    StreamDescriptor::new("campaigns", "api/campaigns", "id"),
    StreamDescriptor::new("campaigns_detailed", "api/campaigns", "id"),
    StreamDescriptor::new("email_templates", "api/templates", "id"),
    StreamDescriptor::new("events", "api/events", "id"),
    StreamDescriptor::new("events_detailed", "api/events", "id"),
    StreamDescriptor::new("flows", "api/flows", "id"),
    StreamDescriptor::new("global_exclusions", "api/profiles", "id"),
    StreamDescriptor::new("lists", "api/lists", "id"),
    StreamDescriptor::new("lists_detailed", "api/lists", "id"),
    StreamDescriptor::new("metrics", "api/metrics", "id"),
    StreamDescriptor::new("profiles", "api/profiles", "id"),
];

pub struct KlaviyoConnector {
    name: String,
    base_url: String,
    auth: ApiKeyAuthenticator,
    client: Client,
}

impl KlaviyoConnector {
    pub fn new(name: &str, cfg: &KlaviyoConfig, client: Client) -> Result<Self, ConfigError> {
        Ok(Self {
            name: name.to_owned(),
            base_url: cfg.base_url.clone(),
            auth: ApiKeyAuthenticator::new(AUTH_SCHEME, cfg.api_key.as_str())?,
            client,
        })
    }
}

impl Connector for KlaviyoConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check_connection(&self) -> Result<ConnectionStatus, ConnectorError> {
        let url = join_url(&self.base_url, CHECK_PATH);
        let authorization = self.auth.header_value();
        let headers = [
            ("authorization", authorization.as_str()),
            ("revision", KLAVIYO_API_REVISION),
        ];

        let status = match get_json(&self.client, &url, &headers).await {
            Ok(_) => ConnectionStatus::succeeded(),
            Err(err) => match err.status().map(|status| status.as_u16()) {
                Some(400) => ConnectionStatus::failed(BAD_REQUEST_MESSAGE),
                Some(401 | 403) => ConnectionStatus::failed(INVALID_KEY_MESSAGE),
                _ => unable_to_connect(CHECK_STREAM, &err),
            },
        };
        Ok(status)
    }

    fn streams(&self) -> Vec<StreamDescriptor> {
        STREAMS.to_vec()
    }
}
