pub mod cleanup_old_telemetry;
pub mod get_deployment;
pub mod retrieve_summary;
pub mod retrieve_telemetry;
pub mod save_telemetry;

pub use cleanup_old_telemetry::CleanupOldTelemetryUseCase;
pub use get_deployment::GetDeploymentUseCase;
pub use retrieve_summary::RetrieveSummaryUseCase;
pub use retrieve_telemetry::RetrieveTelemetryUseCase;
pub use save_telemetry::SaveTelemetryUseCase;
