//! Call-home Domain Layer
pub mod config;
pub mod errors;
pub mod page;
pub mod summary;
pub mod telemetry;
pub mod telemetry_filters;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use page::{PageMetadata, TelemetryPage, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use summary::{CountrySummary, TelemetrySummary};
pub use telemetry::{canonical_ip, Location, Telemetry};
pub use telemetry_filters::TelemetryFilters;
