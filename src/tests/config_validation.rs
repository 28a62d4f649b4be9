#[cfg(test)]
mod tests {

    use std::io::Write;

    use http::Method;
    use serial_test::serial;

    use crate::config::connectors::ConnectorConfig;
    use crate::config::loader::{expand_env_vars, file_to_config, parse_config};
    use crate::config::settings::LogFormat;
    use crate::connectors::build_connector;
    use crate::tests::common::build_reqwest_client;
    use crate::utils::constants::{RAILZ_AUTH_URL, RAILZ_BASE_URL};

    const VALID_CONFIG: &str = r#"
settings:
  logging:
    level: debug
    format: json
  http:
    timeout_ms: 2500
connectors:
  klaviyo:
    type: klaviyo
    api_key: "${KLAVIYO_API_KEY}"
    start_date: "2020-10-10T00:00:00Z"
  pinterest:
    type: pinterest
    client_id: pin_client
    client_secret: pin_secret
    refresh_token: "${PINTEREST_REFRESH_TOKEN:refresh-default}"
    start_date: "2023-01-01"
  railz:
    type: railz
    client_id: client_id
    secret_key: secret_key
    auth_method: POST
"#;

    #[tokio::test]
    #[serial]
    async fn loads_file_with_env_expansion_and_defaults() {
        std::env::set_var("KLAVIYO_API_KEY", "pk_from_env");
        std::env::remove_var("PINTEREST_REFRESH_TOKEN");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_CONFIG.as_bytes()).unwrap();

        let config = file_to_config(file.path()).await.expect("config is valid");
        std::env::remove_var("KLAVIYO_API_KEY");

        let logging = config.settings.logging.as_ref().unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
        assert_eq!(config.settings.http.timeout_ms, 2500);

        match &config.connectors["klaviyo"] {
            ConnectorConfig::Klaviyo(k) => assert_eq!(k.api_key, "pk_from_env"),
            other => panic!("unexpected connector {:?}", other),
        }
        match &config.connectors["pinterest"] {
            ConnectorConfig::Pinterest(p) => assert_eq!(p.refresh_token, "refresh-default"),
            other => panic!("unexpected connector {:?}", other),
        }
        match &config.connectors["railz"] {
            ConnectorConfig::Railz(r) => {
                assert_eq!(r.auth_url, RAILZ_AUTH_URL);
                assert_eq!(r.base_url, RAILZ_BASE_URL);
                assert_eq!(r.auth_method, Method::POST);
                assert_eq!(r.token_key, "access_token");
                assert_eq!(r.lifetime, "PT3600S");
            }
            other => panic!("unexpected connector {:?}", other),
        }

        let client = build_reqwest_client();
        for (name, cfg) in &config.connectors {
            let connector = build_connector(name, cfg, &client).unwrap();
            assert_eq!(connector.name(), name);
            assert!(!connector.streams().is_empty());
        }
    }

    #[tokio::test]
    async fn invalid_config_reports_all_errors() {
        let invalid_yaml = r#"
settings:
  logging:
    level: loud
  http:
    timeout_ms: 0
connectors:
  klaviyo:
    type: klaviyo
    api_key: ""
  pinterest:
    type: pinterest
    client_id: pin_client
    client_secret: pin_secret
    refresh_token: refresh
    start_date: wrong_date_format
  railz:
    type: railz
    client_id: client_id
    secret_key: secret_key
    lifetime: one hour
"#;
        let err = parse_config(invalid_yaml.to_owned()).await.unwrap_err().to_string();

        assert!(err.starts_with("config is not valid, total errors:5"), "{err}");
        assert!(err.contains("settings.logging.level 'loud' invalid"));
        assert!(err.contains("settings.http.timeout_ms must be > 0"));
        assert!(err.contains("connectors.klaviyo.api_key cannot be empty"));
        assert!(err.contains(
            "connectors.pinterest.start_date: Entered `Start Date` wrong_date_format does not match format YYYY-MM-DD"
        ));
        assert!(err.contains("connectors.railz.lifetime: invalid lifetime 'one hour'"));
    }

    #[tokio::test]
    async fn empty_connectors_are_rejected() {
        let err = parse_config("connectors: {}\n".to_owned()).await.unwrap_err().to_string();
        assert!(err.contains("'connectors' is empty"));
    }

    #[tokio::test]
    async fn unknown_connector_type_fails_to_parse() {
        let yaml = r#"
connectors:
  shopify:
    type: shopify
    api_key: key
"#;
        assert!(parse_config(yaml.to_owned()).await.is_err());
    }

    #[test]
    #[serial]
    fn env_expansion_uses_default_when_unset() {
        std::env::remove_var("SOURCE_CONNECTORS_UNSET_VAR");
        assert_eq!(
            expand_env_vars("url: ${SOURCE_CONNECTORS_UNSET_VAR:http://localhost}"),
            "url: http://localhost"
        );
        assert_eq!(expand_env_vars("key: ${SOURCE_CONNECTORS_UNSET_VAR}"), "key: ");
    }
}
