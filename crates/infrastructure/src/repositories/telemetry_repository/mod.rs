mod helpers;
mod reader;
mod writer;

use async_trait::async_trait;
use callhome_application::ports::TelemetryRepository;
use callhome_domain::{
    DomainError, PageMetadata, Telemetry, TelemetryFilters, TelemetryPage, TelemetrySummary,
};
use sqlx::SqlitePool;

pub use helpers::{format_timestamp, parse_timestamp};

/// Event log backed by the `telemetry_events` table.
pub struct SqliteTelemetryRepository {
    pool: SqlitePool,
}

impl SqliteTelemetryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TelemetryRepository for SqliteTelemetryRepository {
    async fn save(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        writer::insert_event(&self.pool, telemetry).await
    }

    async fn retrieve_all(
        &self,
        page: &PageMetadata,
        filters: &TelemetryFilters,
    ) -> Result<TelemetryPage, DomainError> {
        reader::retrieve_all(&self.pool, page, filters).await
    }

    async fn retrieve_summary(
        &self,
        filters: &TelemetryFilters,
    ) -> Result<TelemetrySummary, DomainError> {
        reader::retrieve_summary(&self.pool, filters).await
    }

    async fn delete_older_than(&self, days: u32) -> Result<u64, DomainError> {
        writer::delete_older_than(&self.pool, days).await
    }
}
