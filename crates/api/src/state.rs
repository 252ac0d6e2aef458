use callhome_application::use_cases::{
    GetDeploymentUseCase, RetrieveSummaryUseCase, RetrieveTelemetryUseCase,
    SaveTelemetryUseCase, ServeDashboardUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TelemetryUseCases {
    pub save: Arc<SaveTelemetryUseCase>,
    pub retrieve: Arc<RetrieveTelemetryUseCase>,
    pub summary: Arc<RetrieveSummaryUseCase>,
    pub get_deployment: Arc<GetDeploymentUseCase>,
}

#[derive(Clone)]
pub struct AppState {
    pub telemetry: TelemetryUseCases,
    pub dashboard: Arc<ServeDashboardUseCase>,
}
