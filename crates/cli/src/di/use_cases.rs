use callhome_api::{state::TelemetryUseCases, AppState};
use callhome_application::services::IpMergeLocks;
use callhome_application::use_cases::*;
use callhome_domain::Config;
use callhome_infrastructure::geolocation::HttpLocationService;
use std::sync::Arc;

use super::Repositories;

pub struct UseCases {
    pub save: Arc<SaveTelemetryUseCase>,
    pub retrieve: Arc<RetrieveTelemetryUseCase>,
    pub summary: Arc<RetrieveSummaryUseCase>,
    pub get_deployment: Arc<GetDeploymentUseCase>,
    pub cleanup: Arc<CleanupOldTelemetryUseCase>,
    pub dashboard: Arc<ServeDashboardUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config) -> anyhow::Result<Self> {
        let location = Arc::new(HttpLocationService::new(config.geolocation.clone())?);

        Ok(Self {
            save: Arc::new(
                SaveTelemetryUseCase::new(
                    repos.event_log.clone(),
                    repos.deployments.clone(),
                    location,
                )
                .with_merge_locks(Arc::new(IpMergeLocks::new())),
            ),
            retrieve: Arc::new(RetrieveTelemetryUseCase::new(repos.event_log.clone())),
            summary: Arc::new(RetrieveSummaryUseCase::new(repos.event_log.clone())),
            get_deployment: Arc::new(GetDeploymentUseCase::new(repos.deployments.clone())),
            cleanup: Arc::new(CleanupOldTelemetryUseCase::new(repos.event_log.clone())),
            dashboard: Arc::new(
                ServeDashboardUseCase::new(repos.event_log.clone())
                    .with_page_limit(config.dashboard.page_limit),
            ),
        })
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            telemetry: TelemetryUseCases {
                save: self.save.clone(),
                retrieve: self.retrieve.clone(),
                summary: self.summary.clone(),
                get_deployment: self.get_deployment.clone(),
            },
            dashboard: self.dashboard.clone(),
        }
    }
}
