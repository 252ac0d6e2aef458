use callhome_domain::{canonical_ip, DomainError, Telemetry};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::DeploymentRepository;

pub struct GetDeploymentUseCase {
    deployments: Arc<dyn DeploymentRepository>,
}

impl GetDeploymentUseCase {
    pub fn new(deployments: Arc<dyn DeploymentRepository>) -> Self {
        Self { deployments }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, ip_address: &str) -> Result<Telemetry, DomainError> {
        let ip_address = canonical_ip(ip_address)?;
        self.deployments
            .retrieve_by_ip(&ip_address)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("No deployment for {}", ip_address)))
    }
}
