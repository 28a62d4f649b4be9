use std::collections::HashMap;

use http::Method;
use serde::Deserialize;

use crate::auth::short_lived::{ShortLivedTokenSettings, DEFAULT_LIFETIME, DEFAULT_TOKEN_KEY};
use crate::config::settings::SettingsConfig;
use crate::utils::constants::*;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    pub connectors: HashMap<String, ConnectorConfig>,
}

/// ================================
/// Connectors
/// ================================
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectorConfig {
    Klaviyo(KlaviyoConfig),
    Pinterest(PinterestConfig),
    Railz(RailzConfig),
}

impl ConnectorConfig {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConnectorConfig::Klaviyo(_) => CONNECTOR_KLAVIYO,
            ConnectorConfig::Pinterest(_) => CONNECTOR_PINTEREST,
            ConnectorConfig::Railz(_) => CONNECTOR_RAILZ,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct KlaviyoConfig {
    pub api_key: String,
    /// RFC 3339 timestamp, e.g. 2020-10-10T00:00:00Z
    pub start_date: Option<String>,
    #[serde(default = "default_klaviyo_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PinterestConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    pub account_id: Option<String>,
    #[serde(default = "default_pinterest_base_url")]
    pub base_url: String,
}

impl PinterestConfig {
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RailzConfig {
    pub client_id: String,
    pub secret_key: String,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    #[serde(default = "default_railz_base_url")]
    pub base_url: String,
    #[serde(default = "default_railz_auth_url")]
    pub auth_url: String,
    #[serde(with = "http_serde::method", default = "default_auth_method")]
    pub auth_method: Method,
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// ISO-8601 duration
    #[serde(default = "default_lifetime")]
    pub lifetime: String,
}

impl RailzConfig {
    pub fn token_settings(&self) -> ShortLivedTokenSettings {
        ShortLivedTokenSettings {
            client_id: self.client_id.clone(),
            secret_key: self.secret_key.clone(),
            url: self.auth_url.clone(),
            method: self.auth_method.clone(),
            token_key: self.token_key.clone(),
            lifetime: self.lifetime.clone(),
        }
    }
}

fn default_klaviyo_base_url() -> String {
    KLAVIYO_BASE_URL.to_owned()
}

fn default_pinterest_base_url() -> String {
    PINTEREST_BASE_URL.to_owned()
}

fn default_railz_base_url() -> String {
    RAILZ_BASE_URL.to_owned()
}

fn default_railz_auth_url() -> String {
    RAILZ_AUTH_URL.to_owned()
}

fn default_auth_method() -> Method {
    Method::GET
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_owned()
}

fn default_lifetime() -> String {
    DEFAULT_LIFETIME.to_owned()
}
