use callhome_domain::config::{DatabaseBackend, LogFormat};
use callhome_domain::{CliOverrides, Config, ConfigError};
use std::io::Write;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.port, 8855);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
    assert_eq!(config.database.retention_days, 90);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.dashboard.page_limit, 1000);
    assert!(config.geolocation.endpoint.contains("{ip}"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
        [server]
        port = 9000

        [database]
        backend = "memory"

        [logging]
        format = "json"
        "#,
    )
    .unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.database.backend, DatabaseBackend::Memory);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.dashboard.page_limit, 1000);
}

#[test]
fn test_load_from_file_applies_cli_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = 7000\n\n[database]\npath = \"/tmp/a.db\"").unwrap();

    let config = Config::load(
        Some(file.path().to_str().unwrap()),
        CliOverrides {
            port: Some(7100),
            log_level: Some("debug".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(config.server.port, 7100);
    assert_eq!(config.database.path, "/tmp/a.db");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_load_missing_file_fails() {
    let result = Config::load(Some("/nonexistent/callhome.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[server\nport = 1");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut config = Config::default();
    config.server.port = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.database.path = String::new();
    assert!(config.validate().is_err());
    config.database.backend = DatabaseBackend::Memory;
    assert!(config.validate().is_ok());

    let mut config = Config::default();
    config.geolocation.endpoint = "http://geo.local/lookup".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.dashboard.page_limit = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_geolocation_url_substitution() {
    let config = Config::default();
    let url = config.geolocation.url_for("192.0.2.7");
    assert!(url.starts_with("http://ip-api.com/json/192.0.2.7?"));
}

#[test]
fn test_socket_addr_handles_ipv6_bind() {
    let mut config = Config::default();
    config.server.bind_address = "::".to_string();
    config.server.port = 8855;

    let addr = config.server.socket_addr().unwrap();

    assert!(addr.is_ipv6());
    assert_eq!(addr.port(), 8855);
    assert_eq!(addr.to_string(), "[::]:8855");
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_unparseable_bind_address() {
    let mut config = Config::default();
    config.server.bind_address = "not an address".to_string();

    assert!(matches!(
        config.server.socket_addr(),
        Err(ConfigError::Validation(_))
    ));
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}
