#![allow(dead_code)]

use async_trait::async_trait;
use callhome_application::ports::{DeploymentRepository, LocationService, TelemetryRepository};
use callhome_domain::{
    DomainError, Location, PageMetadata, Telemetry, TelemetryFilters, TelemetryPage,
    TelemetrySummary,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct MockTelemetryRepository {
    events: Arc<RwLock<Vec<Telemetry>>>,
    page: Arc<RwLock<TelemetryPage>>,
    summaries: Arc<RwLock<HashMap<bool, TelemetrySummary>>>,
    seen_filters: Arc<RwLock<Vec<TelemetryFilters>>>,
    seen_pages: Arc<RwLock<Vec<PageMetadata>>>,
    save_error: Arc<RwLock<Option<DomainError>>>,
    read_error: Arc<RwLock<Option<DomainError>>>,
    deleted: Arc<RwLock<u64>>,
}

impl MockTelemetryRepository {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            page: Arc::new(RwLock::new(TelemetryPage::default())),
            summaries: Arc::new(RwLock::new(HashMap::new())),
            seen_filters: Arc::new(RwLock::new(Vec::new())),
            seen_pages: Arc::new(RwLock::new(Vec::new())),
            save_error: Arc::new(RwLock::new(None)),
            read_error: Arc::new(RwLock::new(None)),
            deleted: Arc::new(RwLock::new(0)),
        }
    }

    pub async fn events(&self) -> Vec<Telemetry> {
        self.events.read().await.clone()
    }

    pub async fn set_page(&self, telemetry: Vec<Telemetry>, total: u64) {
        *self.page.write().await = TelemetryPage {
            metadata: PageMetadata {
                total,
                ..Default::default()
            },
            telemetry,
        };
    }

    /// `filtered` selects which summary is returned for non-empty filters.
    pub async fn set_summary(&self, filtered: bool, summary: TelemetrySummary) {
        self.summaries.write().await.insert(filtered, summary);
    }

    pub async fn set_save_error(&self, error: DomainError) {
        *self.save_error.write().await = Some(error);
    }

    pub async fn set_read_error(&self, error: DomainError) {
        *self.read_error.write().await = Some(error);
    }

    pub async fn set_deleted(&self, deleted: u64) {
        *self.deleted.write().await = deleted;
    }

    pub async fn seen_filters(&self) -> Vec<TelemetryFilters> {
        self.seen_filters.read().await.clone()
    }

    pub async fn seen_pages(&self) -> Vec<PageMetadata> {
        self.seen_pages.read().await.clone()
    }
}

impl Default for MockTelemetryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelemetryRepository for MockTelemetryRepository {
    async fn save(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        if let Some(err) = self.save_error.read().await.clone() {
            return Err(err);
        }
        self.events.write().await.push(telemetry.clone());
        Ok(())
    }

    async fn retrieve_all(
        &self,
        page: &PageMetadata,
        filters: &TelemetryFilters,
    ) -> Result<TelemetryPage, DomainError> {
        if let Some(err) = self.read_error.read().await.clone() {
            return Err(err);
        }
        self.seen_pages.write().await.push(*page);
        self.seen_filters.write().await.push(filters.clone());
        let mut result = self.page.read().await.clone();
        result.metadata.offset = page.offset;
        result.metadata.limit = page.limit;
        Ok(result)
    }

    async fn retrieve_summary(
        &self,
        filters: &TelemetryFilters,
    ) -> Result<TelemetrySummary, DomainError> {
        if let Some(err) = self.read_error.read().await.clone() {
            return Err(err);
        }
        self.seen_filters.write().await.push(filters.clone());
        Ok(self
            .summaries
            .read()
            .await
            .get(&!filters.is_empty())
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_older_than(&self, _days: u32) -> Result<u64, DomainError> {
        Ok(*self.deleted.read().await)
    }
}

#[derive(Clone)]
pub struct MockDeploymentRepository {
    records: Arc<RwLock<HashMap<String, Telemetry>>>,
    lookup_error: Arc<RwLock<Option<DomainError>>>,
    lookup_delay: Arc<RwLock<Option<Duration>>>,
    saves: Arc<AtomicUsize>,
    updates: Arc<AtomicUsize>,
    lookups: Arc<AtomicUsize>,
}

impl MockDeploymentRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            lookup_error: Arc::new(RwLock::new(None)),
            lookup_delay: Arc::new(RwLock::new(None)),
            saves: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(AtomicUsize::new(0)),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn insert(&self, telemetry: Telemetry) {
        self.records
            .write()
            .await
            .insert(telemetry.ip_address.clone(), telemetry);
    }

    pub async fn get(&self, ip: &str) -> Option<Telemetry> {
        self.records.read().await.get(ip).cloned()
    }

    pub async fn set_lookup_error(&self, error: DomainError) {
        *self.lookup_error.write().await = Some(error);
    }

    /// Widens the read-merge-write window so concurrent saves interleave.
    pub async fn set_lookup_delay(&self, delay: Duration) {
        *self.lookup_delay.write().await = Some(delay);
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for MockDeploymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeploymentRepository for MockDeploymentRepository {
    async fn save(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.records
            .write()
            .await
            .insert(telemetry.ip_address.clone(), telemetry.clone());
        Ok(())
    }

    async fn update(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.write().await;
        match records.get_mut(&telemetry.ip_address) {
            Some(record) => {
                *record = telemetry.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(telemetry.ip_address.clone())),
        }
    }

    async fn retrieve_by_ip(&self, ip_address: &str) -> Result<Option<Telemetry>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.lookup_error.read().await.clone() {
            return Err(err);
        }
        let record = self.records.read().await.get(ip_address).cloned();
        if let Some(delay) = *self.lookup_delay.read().await {
            tokio::time::sleep(delay).await;
        }
        Ok(record)
    }
}

#[derive(Clone)]
pub struct MockLocationService {
    locations: Arc<RwLock<HashMap<String, Location>>>,
    should_fail: Arc<RwLock<bool>>,
    calls: Arc<AtomicUsize>,
}

impl MockLocationService {
    pub fn new() -> Self {
        Self {
            locations: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn set_location(&self, ip: &str, location: Location) {
        self.locations
            .write()
            .await
            .insert(ip.to_string(), location);
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockLocationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationService for MockLocationService {
    async fn get_location(&self, ip_address: &str) -> Result<Location, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().await {
            return Err(DomainError::LocationLookupFailed(
                "Mock location service failed".to_string(),
            ));
        }
        Ok(self
            .locations
            .read()
            .await
            .get(ip_address)
            .cloned()
            .unwrap_or_else(|| Location {
                country: "Serbia".to_string(),
                city: "Belgrade".to_string(),
                latitude: 44.8,
                longitude: 20.46,
            }))
    }
}

pub fn location(country: &str, city: &str, latitude: f64, longitude: f64) -> Location {
    Location {
        country: country.to_string(),
        city: city.to_string(),
        latitude,
        longitude,
    }
}
