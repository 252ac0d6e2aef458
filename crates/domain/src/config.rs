pub mod dashboard;
pub mod database;
pub mod errors;
pub mod geolocation;
pub mod logging;
pub mod root;
pub mod server;

pub use dashboard::DashboardConfig;
pub use database::{DatabaseBackend, DatabaseConfig};
pub use errors::ConfigError;
pub use geolocation::GeolocationConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
