mod deployment_repository;
mod location_service;
mod telemetry_repository;

pub use deployment_repository::DeploymentRepository;
pub use location_service::LocationService;
pub use telemetry_repository::TelemetryRepository;
