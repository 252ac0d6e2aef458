use callhome_application::ports::{DeploymentRepository, TelemetryRepository};
use callhome_domain::config::DatabaseBackend;
use callhome_domain::Config;
use callhome_infrastructure::repositories::{
    InMemoryDeploymentRepository, InMemoryTelemetryRepository, SqliteDeploymentRepository,
    SqliteTelemetryRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::bootstrap;

pub struct Repositories {
    pub event_log: Arc<dyn TelemetryRepository>,
    pub deployments: Arc<dyn DeploymentRepository>,
    /// Present only for the SQLite backend.
    pub pool: Option<SqlitePool>,
}

impl Repositories {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        match config.database.backend {
            DatabaseBackend::Sqlite => {
                let pool = bootstrap::init_database(&config.database).await?;
                Ok(Self {
                    event_log: Arc::new(SqliteTelemetryRepository::new(pool.clone())),
                    deployments: Arc::new(SqliteDeploymentRepository::new(pool.clone())),
                    pool: Some(pool),
                })
            }
            DatabaseBackend::Memory => {
                warn!("Using in-memory storage; telemetry is lost on restart");
                info!("Repositories initialized (memory backend)");
                let deployments = Arc::new(InMemoryDeploymentRepository::new());
                Ok(Self {
                    event_log: Arc::new(
                        InMemoryTelemetryRepository::new().with_deployments(deployments.clone()),
                    ),
                    deployments,
                    pool: None,
                })
            }
        }
    }
}
