use reqwest::Client;

use crate::auth::short_lived::ShortLivedTokenAuthenticator;
use crate::auth::Authenticator;
use crate::config::connectors::RailzConfig;
use crate::connectors::{
    get_json, join_url, unable_to_connect, ConnectionStatus, Connector, StreamDescriptor,
};
use crate::error::{ConfigError, ConnectorError};

const CHECK_STREAM: &str = "businesses";
const CHECK_PATH: &str = "businesses";

const STREAMS: [StreamDescriptor; 15] = [
    StreamDescriptor::new("businesses", "businesses", "businessName"),
    StreamDescriptor::new("accounting_transactions", "accountingTransactions", "id"),
    StreamDescriptor::new("accounts", "accounts", "id"),
    StreamDescriptor::new("bank_accounts", "bankAccounts", "id"),
    StreamDescriptor::new("bank_transfers", "bankTransfers", "id"),
    StreamDescriptor::new("bills", "bills", "id"),
    StreamDescriptor::new("bills_credit_notes", "bills/creditNotes", "id"),
    StreamDescriptor::new("bills_payments", "bills/payments", "id"),
    StreamDescriptor::new("customers", "customers", "id"),
    StreamDescriptor::new("deposits", "deposits", "id"),
    StreamDescriptor::new("estimates", "estimates", "id"),
    StreamDescriptor::new("invoices", "invoices", "id"),
    StreamDescriptor::new("invoices_credit_notes", "invoices/creditNotes", "id"),
    StreamDescriptor::new("invoices_payments", "invoices/payments", "id"),
    StreamDescriptor::new("journal_entries", "journalEntries", "id"),
];

pub struct RailzConnector {
    name: String,
    base_url: String,
    auth: ShortLivedTokenAuthenticator,
    client: Client,
}

impl RailzConnector {
    pub fn new(name: &str, cfg: &RailzConfig, client: Client) -> Result<Self, ConfigError> {
        Ok(Self {
            name: name.to_owned(),
            base_url: cfg.base_url.clone(),
            auth: ShortLivedTokenAuthenticator::new(cfg.token_settings(), client.clone())?,
            client,
        })
    }

    pub fn authenticator(&self) -> &ShortLivedTokenAuthenticator {
        &self.auth
    }
}

impl Connector for RailzConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check_connection(&self) -> Result<ConnectionStatus, ConnectorError> {
        let authorization = match self.auth.authorization().await {
            Ok(value) => value,
            Err(err) => return Ok(unable_to_connect(CHECK_STREAM, &err)),
        };

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
