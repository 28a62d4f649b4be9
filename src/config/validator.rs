//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks credentials, start dates, token lifetimes, logging and HTTP settings

use chrono::{DateTime, NaiveDate};
use tracing::{error, info};

use crate::auth::lifetime::parse_lifetime;
use crate::config::connectors::{
    ConnectorConfig, KlaviyoConfig, PinterestConfig, RailzConfig, ServiceConfig,
};
use crate::config::settings::SettingsConfig;
use crate::error::ConfigError;
use crate::observability::metrics::get_metrics;

const START_DATE_FORMAT: &str = "%Y-%m-%d";

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);

    if cfg.connectors.is_empty() {
        errors.push("config: 'connectors' is empty; at least one connector required".to_string());
    }

    for (name, connector) in &cfg.connectors {
        match connector {
            ConnectorConfig::Klaviyo(klaviyo) => validate_klaviyo(name, klaviyo, &mut errors),
            ConnectorConfig::Pinterest(pinterest) => validate_pinterest(name, pinterest, &mut errors),
            ConnectorConfig::Railz(railz) => validate_railz(name, railz, &mut errors),
        }
    }

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().await.config_validation_errors.inc_by(errors.len() as u64);
        Err(errors)
    }
}

/// `YYYY-MM-DD`, as the Pinterest and Railz APIs expect.
pub fn parse_start_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, START_DATE_FORMAT)
        .map_err(|_| ConfigError::InvalidStartDate { value: value.to_owned() })
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }

    if settings.http.timeout_ms == 0 {
        errors.push("settings.http.timeout_ms must be > 0".to_string());
    }
}

fn validate_klaviyo(name: &str, cfg: &KlaviyoConfig, errors: &mut Vec<String>) {
    require(name, "api_key", &cfg.api_key, errors);
    require(name, "base_url", &cfg.base_url, errors);
    if let Some(start_date) = &cfg.start_date {
        if DateTime::parse_from_rfc3339(start_date).is_err() {
            errors.push(format!(
                "connectors.{}.start_date '{}' must be an RFC 3339 timestamp",
                name, start_date
            ));
        }
    }
}

fn validate_pinterest(name: &str, cfg: &PinterestConfig, errors: &mut Vec<String>) {
    require(name, "client_id", &cfg.client_id, errors);
    require(name, "client_secret", &cfg.client_secret, errors);
    require(name, "refresh_token", &cfg.refresh_token, errors);
    require(name, "base_url", &cfg.base_url, errors);
    validate_start_date(name, cfg.start_date.as_deref(), errors);
    if let Some(account_id) = &cfg.account_id {
        require(name, "account_id", account_id, errors);
    }
}

fn validate_railz(name: &str, cfg: &RailzConfig, errors: &mut Vec<String>) {
    require(name, "client_id", &cfg.client_id, errors);
    require(name, "secret_key", &cfg.secret_key, errors);
    require(name, "base_url", &cfg.base_url, errors);
    require(name, "auth_url", &cfg.auth_url, errors);
    require(name, "token_key", &cfg.token_key, errors);
    validate_start_date(name, cfg.start_date.as_deref(), errors);
    if let Err(e) = parse_lifetime(&cfg.lifetime) {
        errors.push(format!("connectors.{}.lifetime: {}", name, e));
    }
}

fn validate_start_date(name: &str, start_date: Option<&str>, errors: &mut Vec<String>) {
    if let Some(Err(e)) = start_date.map(parse_start_date) {
        errors.push(format!("connectors.{}.start_date: {}", name, e));
    }
}

fn require(name: &str, field: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("connectors.{}.{} cannot be empty", name, field));
    }
}
