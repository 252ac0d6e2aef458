use callhome_domain::{DomainError, PageMetadata, TelemetryFilters, TelemetryPage};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::TelemetryRepository;

pub struct RetrieveTelemetryUseCase {
    event_log: Arc<dyn TelemetryRepository>,
}

impl RetrieveTelemetryUseCase {
    pub fn new(event_log: Arc<dyn TelemetryRepository>) -> Self {
        Self { event_log }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        page: PageMetadata,
        filters: TelemetryFilters,
    ) -> Result<TelemetryPage, DomainError> {
        let filters = filters.normalized();
        filters.validate()?;

        let result = self
            .event_log
            .retrieve_all(&page, &filters)
            .await
            .map_err(|e| e.with_context("retrieve telemetry"))?;

        debug!(
            total = result.metadata.total,
            returned = result.telemetry.len(),
            "Telemetry page retrieved"
        );
        Ok(result)
    }
}
