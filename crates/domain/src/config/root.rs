use serde::{Deserialize, Serialize};

use super::dashboard::DashboardConfig;
use super::database::{DatabaseBackend, DatabaseConfig};
use super::errors::ConfigError;
use super::geolocation::{GeolocationConfig, IP_PLACEHOLDER};
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG: &str = "callhome.toml";
const SYSTEM_CONFIG: &str = "/etc/callhome/config.toml";

/// Main configuration structure for the call-home collector
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub geolocation: GeolocationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. callhome.toml in current directory
    /// 3. /etc/callhome/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG).exists() {
            Self::from_file(LOCAL_CONFIG)?
        } else if std::path::Path::new(SYSTEM_CONFIG).exists() {
            Self::from_file(SYSTEM_CONFIG)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        self.server.socket_addr()?;

        if self.database.backend == DatabaseBackend::Sqlite
            && self.database.path.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "Database path cannot be empty for the sqlite backend".to_string(),
            ));
        }

        if !self.geolocation.endpoint.contains(IP_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "Geolocation endpoint must contain the {} placeholder",
                IP_PLACEHOLDER
            )));
        }

        if self.dashboard.page_limit == 0 {
            return Err(ConfigError::Validation(
                "Dashboard page limit cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
