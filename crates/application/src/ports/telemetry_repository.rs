use async_trait::async_trait;
use callhome_domain::{DomainError, PageMetadata, Telemetry, TelemetryFilters, TelemetryPage, TelemetrySummary};

/// Append-only event log of call-home pings.
#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    async fn save(&self, telemetry: &Telemetry) -> Result<(), DomainError>;

    /// Latest matching row per distinct IP, newest first, annotated with the
    /// services ever reported by that IP, including services whose events were
    /// since pruned. `total` counts distinct IPs.
    async fn retrieve_all(
        &self,
        page: &PageMetadata,
        filters: &TelemetryFilters,
    ) -> Result<TelemetryPage, DomainError>;

    async fn retrieve_summary(
        &self,
        filters: &TelemetryFilters,
    ) -> Result<TelemetrySummary, DomainError>;

    async fn delete_older_than(&self, days: u32) -> Result<u64, DomainError>;
}
