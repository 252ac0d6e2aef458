use callhome_domain::{DomainError, TelemetryFilters, TelemetrySummary};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::TelemetryRepository;

pub struct RetrieveSummaryUseCase {
    event_log: Arc<dyn TelemetryRepository>,
}

impl RetrieveSummaryUseCase {
    pub fn new(event_log: Arc<dyn TelemetryRepository>) -> Self {
        Self { event_log }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, filters: TelemetryFilters) -> Result<TelemetrySummary, DomainError> {
        let filters = filters.normalized();
        filters.validate()?;

        let summary = self
            .event_log
            .retrieve_summary(&filters)
            .await
            .map_err(|e| e.with_context("retrieve summary"))?;

        debug!(
            countries = summary.countries.len(),
            total_deployments = summary.total_deployments,
            "Telemetry summary retrieved"
        );
        Ok(summary)
    }
}
