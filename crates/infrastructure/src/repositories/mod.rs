pub mod deployment_repository;
pub mod errors;
pub mod memory;
pub mod telemetry_repository;

pub use deployment_repository::SqliteDeploymentRepository;
pub use memory::{InMemoryDeploymentRepository, InMemoryTelemetryRepository};
pub use telemetry_repository::SqliteTelemetryRepository;
