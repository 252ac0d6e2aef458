use callhome_domain::Config;
use callhome_jobs::{JobRunner, TelemetryRetentionJob, WalCheckpointJob};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{Repositories, UseCases};

pub async fn start_jobs(
    config: &Config,
    repos: &Repositories,
    use_cases: &UseCases,
    shutdown: CancellationToken,
) -> Vec<JoinHandle<()>> {
    let mut runner = JobRunner::new().with_shutdown_token(shutdown);

    if config.database.retention_days > 0 {
        runner = runner.with_retention(
            TelemetryRetentionJob::new(use_cases.cleanup.clone(), config.database.retention_days)
                .with_interval(config.database.retention_interval_secs),
        );
    } else {
        info!("Telemetry retention disabled (retention_days = 0)");
    }

    if let Some(pool) = &repos.pool {
        runner = runner.with_wal_checkpoint(WalCheckpointJob::new(pool.clone()));
    }

    runner.start().await
}
