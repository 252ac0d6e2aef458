use callhome_domain::{DomainError, PageMetadata, TelemetryFilters};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::TelemetryRepository;
use crate::services::{DashboardData, DashboardRenderer};

pub const DEFAULT_DASHBOARD_PAGE_LIMIT: u64 = 1000;

pub struct ServeDashboardUseCase {
    event_log: Arc<dyn TelemetryRepository>,
    renderer: DashboardRenderer,
    page_limit: u64,
}

impl ServeDashboardUseCase {
    pub fn new(event_log: Arc<dyn TelemetryRepository>) -> Self {
        Self {
            event_log,
            renderer: DashboardRenderer::new(),
            page_limit: DEFAULT_DASHBOARD_PAGE_LIMIT,
        }
    }

    pub fn with_page_limit(mut self, page_limit: u64) -> Self {
        self.page_limit = page_limit;
        self
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, filters: TelemetryFilters) -> Result<Vec<u8>, DomainError> {
        let filters = filters.normalized();
        filters.validate()?;

        let summary = self
            .event_log
            .retrieve_summary(&filters)
            .await
            .map_err(|e| e.with_context("dashboard: summary"))?;

        let options = if filters.is_empty() {
            summary.clone()
        } else {
            self.event_log
                .retrieve_summary(&TelemetryFilters::default())
                .await
                .map_err(|e| e.with_context("dashboard: filter options"))?
        };

        let page = self
            .event_log
            .retrieve_all(&PageMetadata::new(0, self.page_limit), &filters)
            .await
            .map_err(|e| e.with_context("dashboard: deployments"))?;

        debug!(deployments = page.telemetry.len(), "Rendering dashboard");

        self.renderer.render(&DashboardData {
            filters,
            summary,
            options,
            page,
        })
    }
}
