use callhome_application::use_cases::CleanupOldTelemetryUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodically prunes event-log rows older than the retention window.
pub struct TelemetryRetentionJob {
    cleanup: Arc<CleanupOldTelemetryUseCase>,
    retention_days: u32,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl TelemetryRetentionJob {
    pub fn new(cleanup: Arc<CleanupOldTelemetryUseCase>, retention_days: u32) -> Self {
        Self {
            cleanup,
            retention_days,
            interval_secs: 3600,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            retention_days = self.retention_days,
            interval_secs = self.interval_secs,
            "Starting telemetry retention job"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("TelemetryRetentionJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.cleanup.execute(self.retention_days).await {
                        Ok(deleted) => {
                            info!(deleted, "Telemetry retention cleanup completed");
                        }
                        Err(e) => {
                            error!(error = %e, "Telemetry retention cleanup failed");
                        }
                    }
                }
            }
        }
    }
}
