pub mod dashboard;
pub mod telemetry;

pub use dashboard::ServeDashboardUseCase;
pub use telemetry::{
    CleanupOldTelemetryUseCase, GetDeploymentUseCase, RetrieveSummaryUseCase,
    RetrieveTelemetryUseCase, SaveTelemetryUseCase,
};
