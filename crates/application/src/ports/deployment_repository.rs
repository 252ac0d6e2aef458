use async_trait::async_trait;
use callhome_domain::{DomainError, Telemetry};

/// One record per IP address carrying the accumulated service list.
#[async_trait]
pub trait DeploymentRepository: Send + Sync {
    /// Creates the record. If one already exists for the IP, its services are
    /// unioned with the incoming ones as `update` would.
    async fn save(&self, telemetry: &Telemetry) -> Result<(), DomainError>;

    /// Fails with `DomainError::NotFound` when no record exists for the IP.
    async fn update(&self, telemetry: &Telemetry) -> Result<(), DomainError>;

    async fn retrieve_by_ip(&self, ip_address: &str) -> Result<Option<Telemetry>, DomainError>;
}
