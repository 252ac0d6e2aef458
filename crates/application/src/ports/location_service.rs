use async_trait::async_trait;
use callhome_domain::{DomainError, Location};

#[async_trait]
pub trait LocationService: Send + Sync {
    async fn get_location(&self, ip_address: &str) -> Result<Location, DomainError>;
}
