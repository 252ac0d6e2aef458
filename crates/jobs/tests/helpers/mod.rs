#![allow(dead_code)]

use async_trait::async_trait;
use callhome_application::ports::TelemetryRepository;
use callhome_domain::{
    DomainError, PageMetadata, Telemetry, TelemetryFilters, TelemetryPage, TelemetrySummary,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts retention sweeps and the window they were asked for.
#[derive(Clone, Default)]
pub struct MockTelemetryRepository {
    sweeps: Arc<AtomicUsize>,
    last_days: Arc<AtomicUsize>,
    fail: bool,
}

impl MockTelemetryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sweeps(&self) -> usize {
        self.sweeps.load(Ordering::SeqCst)
    }

    pub fn last_days(&self) -> usize {
        self.last_days.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TelemetryRepository for MockTelemetryRepository {
    async fn save(&self, _telemetry: &Telemetry) -> Result<(), DomainError> {
        Ok(())
    }

    async fn retrieve_all(
        &self,
        page: &PageMetadata,
        _filters: &TelemetryFilters,
    ) -> Result<TelemetryPage, DomainError> {
        Ok(TelemetryPage::empty(*page))
    }

    async fn retrieve_summary(
        &self,
        _filters: &TelemetryFilters,
    ) -> Result<TelemetrySummary, DomainError> {
        Ok(TelemetrySummary::default())
    }

    async fn delete_older_than(&self, days: u32) -> Result<u64, DomainError> {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        self.last_days.store(days as usize, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::DatabaseError("locked".to_string()));
        }
        Ok(0)
    }
}
