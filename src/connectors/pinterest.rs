use reqwest::Client;
use tracing::debug;

use crate::auth::refresh::RefreshTokenAuthenticator;
use crate::auth::Authenticator;
use crate::config::connectors::PinterestConfig;
use crate::config::validator::parse_start_date;
use crate::connectors::{
    get_json, join_url, unable_to_connect, ConnectionStatus, Connector, StreamDescriptor,
};
use crate::error::{ConfigError, ConnectorError};

const CHECK_STREAM: &str = "boards";
const CHECK_PATH: &str = "boards?page_size=1";
const ACCOUNT_STREAM: &str = "ad_accounts";

const STREAMS: [StreamDescriptor; 16] = [
    StreamDescriptor::new("ad_accounts", "ad_accounts", "id"),
    StreamDescriptor::new("ad_account_analytics", "ad_accounts/{ad_account_id}/analytics", "DATE"),
    StreamDescriptor::new("ads", "ad_accounts/{ad_account_id}/ads", "id"),
    StreamDescriptor::new("ad_analytics", "ad_accounts/{ad_account_id}/ads/analytics", "AD_ID"),
    StreamDescriptor::new("ad_groups", "ad_accounts/{ad_account_id}/ad_groups", "id"),
    StreamDescriptor::new("ad_group_analytics", "ad_accounts/{ad_account_id}/ad_groups/analytics", "AD_GROUP_ID"),
    StreamDescriptor::new("audiences", "ad_accounts/{ad_account_id}/audiences", "id"),
    StreamDescriptor::new("boards", "boards", "id"),
    StreamDescriptor::new("board_pins", "boards/{board_id}/pins", "id"),
    StreamDescriptor::new("board_sections", "boards/{board_id}/sections", "id"),
    StreamDescriptor::new("board_section_pins", "boards/{board_id}/sections/{section_id}/pins", "id"),
    StreamDescriptor::new("campaigns", "ad_accounts/{ad_account_id}/campaigns", "id"),
    StreamDescriptor::new("campaign_analytics", "ad_accounts/{ad_account_id}/campaigns/analytics", "CAMPAIGN_ID"),
    StreamDescriptor::new("conversion_tags", "ad_accounts/{ad_account_id}/conversion_tags", "id"),
    StreamDescriptor::new("customer_lists", "ad_accounts/{ad_account_id}/customer_lists", "id"),
    StreamDescriptor::new("keywords", "ad_accounts/{ad_account_id}/keywords", "id"),
];

pub struct PinterestConnector {
    name: String,
    base_url: String,
    start_date: Option<String>,
    account_id: Option<String>,
    auth: RefreshTokenAuthenticator,
    client: Client,
}

impl PinterestConnector {
    /// The start date is checked by `check_connection`, not here, so a bad
    /// value is reported to the user as a config problem.
    pub fn new(name: &str, cfg: &PinterestConfig, client: Client) -> Result<Self, ConfigError> {
        let auth = RefreshTokenAuthenticator::new(
            cfg.client_id.clone(),
            cfg.client_secret.clone(),
            cfg.refresh_token.clone(),
            cfg.token_url(),
            client.clone(),
        )?;

        Ok(Self {
            name: name.to_owned(),
            base_url: cfg.base_url.clone(),
            start_date: cfg.start_date.clone(),
            account_id: cfg.account_id.clone(),
            auth,
            client,
        })
    }

    pub fn authenticator(&self) -> &RefreshTokenAuthenticator {
        &self.auth
    }

    /// `Ok(None)` when the account exists, `Ok(Some(status))` when it could
    /// not be looked up.
    async fn check_account(
        &self,
        account_id: &str,
        authorization: &str,
    ) -> Result<Option<ConnectionStatus>, ConnectorError> {
        let url = join_url(&self.base_url, &format!("ad_accounts/{}", account_id));
        let invalid = || ConnectorError::InvalidAccount { account_id: account_id.to_owned() };

        match get_json(&self.client, &url, &[("authorization", authorization)]).await {
            Ok(body) if body.get("id").is_some_and(|id| !id.is_null()) => {
                debug!(account_id, "ad account found");
                Ok(None)
            }
            Ok(_) => Err(invalid()),
            Err(err) if err.status().map(|s| s.as_u16()) == Some(404) => Err(invalid()),
            Err(err) => Ok(Some(unable_to_connect(ACCOUNT_STREAM, &err))),
        }
    }
}

impl Connector for PinterestConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check_connection(&self) -> Result<ConnectionStatus, ConnectorError> {
        if let Some(start_date) = &self.start_date {
            parse_start_date(start_date)?;
        }

        let authorization = match self.auth.authorization().await {
            Ok(value) => value,
            Err(err) => return Ok(unable_to_connect(CHECK_STREAM, &err)),
        };

        if let Some(account_id) = &self.account_id {
            if let Some(status) = self.check_account(account_id, &authorization).await? {
                return Ok(status);
            }
        }

        let url = join_url(&self.base_url, CHECK_PATH);
        let status = match get_json(&self.client, &url, &[("authorization", authorization.as_str())]).await {
            Ok(_) => ConnectionStatus::succeeded(),
            Err(err) => unable_to_connect(CHECK_STREAM, &err),
        };
        Ok(status)
    }

    fn streams(&self) -> Vec<StreamDescriptor> {
        STREAMS.to_vec()
    }
}
