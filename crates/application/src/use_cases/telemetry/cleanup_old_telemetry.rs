use callhome_domain::DomainError;
use std::sync::Arc;
use tracing::info;

use crate::ports::TelemetryRepository;

pub struct CleanupOldTelemetryUseCase {
    event_log: Arc<dyn TelemetryRepository>,
}

impl CleanupOldTelemetryUseCase {
    pub fn new(event_log: Arc<dyn TelemetryRepository>) -> Self {
        Self { event_log }
    }

    pub async fn execute(&self, retention_days: u32) -> Result<u64, DomainError> {
        let deleted = self.event_log.delete_older_than(retention_days).await?;
        info!(deleted, retention_days, "Old telemetry events cleaned up");
        Ok(deleted)
    }
}
