//! Process-local stores implementing the same contract as the SQLite ones.

use async_trait::async_trait;
use callhome_application::ports::{DeploymentRepository, TelemetryRepository};
use callhome_domain::{
    CountrySummary, DomainError, PageMetadata, Telemetry, TelemetryFilters, TelemetryPage,
    TelemetrySummary,
};
use chrono::Utc;
use dashmap::DashMap;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

struct StoredEvent {
    id: u64,
    telemetry: Telemetry,
}

#[derive(Default)]
struct EventLog {
    next_id: u64,
    events: Vec<StoredEvent>,
}

#[derive(Default)]
pub struct InMemoryTelemetryRepository {
    log: RwLock<EventLog>,
    deployments: Option<Arc<InMemoryDeploymentRepository>>,
}

impl InMemoryTelemetryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads accumulated service lists from `deployments` so that listings
    /// keep services whose events were pruned.
    pub fn with_deployments(mut self, deployments: Arc<InMemoryDeploymentRepository>) -> Self {
        self.deployments = Some(deployments);
        self
    }

    fn services_of(&self, events: &[StoredEvent], ip: &str) -> Vec<String> {
        let mut services = self
            .deployments
            .as_ref()
            .and_then(|d| d.records.get(ip).map(|r| r.services.clone()))
            .unwrap_or_default();
        for service in event_services(events, ip) {
            if !services.contains(&service) {
                services.push(service);
            }
        }
        services
    }

    pub async fn len(&self) -> usize {
        self.log.read().await.events.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Latest matching event per IP, newest first, with ties broken by id.
fn latest_per_ip<'a>(events: &'a [StoredEvent], filters: &TelemetryFilters) -> Vec<&'a StoredEvent> {
    let mut latest: HashMap<&str, &StoredEvent> = HashMap::new();
    for event in events.iter().filter(|e| filters.matches(&e.telemetry)) {
        latest
            .entry(event.telemetry.ip_address.as_str())
            .and_modify(|current| {
                if (event.telemetry.last_seen, event.id) > (current.telemetry.last_seen, current.id) {
                    *current = event;
                }
            })
            .or_insert(event);
    }

    let mut rows: Vec<&StoredEvent> = latest.into_values().collect();
    rows.sort_by(|a, b| {
        (b.telemetry.last_seen, b.id).cmp(&(a.telemetry.last_seen, a.id))
    });
    rows
}

fn event_services(events: &[StoredEvent], ip: &str) -> Vec<String> {
    let mut services: Vec<String> = Vec::new();
    for event in events.iter().filter(|e| e.telemetry.ip_address == ip) {
        let service = &event.telemetry.service;
        if !service.is_empty() && !services.contains(service) {
            services.push(service.clone());
        }
    }
    services
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl TelemetryRepository for InMemoryTelemetryRepository {
    async fn save(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        if telemetry.ip_address.is_empty() {
            return Err(DomainError::InvalidEvent(
                "insert telemetry event: empty ip_address".to_string(),
            ));
        }
        let mut log = self.log.write().await;
        log.next_id += 1;
        let id = log.next_id;
        log.events.push(StoredEvent {
            id,
            telemetry: telemetry.clone(),
        });
        Ok(())
    }

    async fn retrieve_all(
        &self,
        page: &PageMetadata,
        filters: &TelemetryFilters,
    ) -> Result<TelemetryPage, DomainError> {
        let log = self.log.read().await;
        let rows = latest_per_ip(&log.events, filters);
        let total = rows.len() as u64;

        let telemetry = rows
            .into_iter()
            .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .map(|event| {
                let mut t = event.telemetry.clone();
                t.services = self.services_of(&log.events, &t.ip_address);
                t
            })
            .collect::<Vec<_>>();

        debug!(total, returned = telemetry.len(), "Telemetry page fetched");
        Ok(TelemetryPage {
            metadata: PageMetadata {
                total,
                offset: page.offset,
                limit: page.limit,
            },
            telemetry,
        })
    }

    async fn retrieve_summary(
        &self,
        filters: &TelemetryFilters,
    ) -> Result<TelemetrySummary, DomainError> {
        let log = self.log.read().await;

        let mut per_country: HashMap<&str, u64> = HashMap::new();
        for event in latest_per_ip(&log.events, filters) {
            *per_country.entry(event.telemetry.country.as_str()).or_default() += 1;
        }
        let countries = per_country
            .into_iter()
            .map(|(country, deployments)| CountrySummary {
                country: country.to_string(),
                deployments,
            })
            .collect();

        let matching: Vec<&Telemetry> = log
            .events
            .iter()
            .map(|e| &e.telemetry)
            .filter(|t| filters.matches(t))
            .collect();

        Ok(TelemetrySummary::from_countries(countries).with_options(
            distinct(matching.iter().map(|t| t.city.as_str())),
            distinct(matching.iter().map(|t| t.version.as_str())),
            distinct(matching.iter().map(|t| t.service.as_str())),
        ))
    }

    async fn delete_older_than(&self, days: u32) -> Result<u64, DomainError> {
        let cutoff = Utc::now() - chrono::Duration::days(days as i64);
        let mut log = self.log.write().await;
        let before = log.events.len();
        log.events.retain(|e| e.telemetry.last_seen >= cutoff);
        Ok((before - log.events.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryDeploymentRepository {
    records: DashMap<String, Telemetry>,
}

impl InMemoryDeploymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn merge_record(record: &mut Telemetry, telemetry: &Telemetry) {
    let mut services = std::mem::take(&mut record.services);
    for service in &telemetry.services {
        if !services.contains(service) {
            services.push(service.clone());
        }
    }
    *record = Telemetry {
        services,
        ..telemetry.clone()
    };
}

#[async_trait]
impl DeploymentRepository for InMemoryDeploymentRepository {
    async fn save(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        use dashmap::mapref::entry::Entry;

        match self.records.entry(telemetry.ip_address.clone()) {
            Entry::Occupied(mut slot) => merge_record(slot.get_mut(), telemetry),
            Entry::Vacant(slot) => {
                slot.insert(telemetry.clone());
            }
        }
        Ok(())
    }

    async fn update(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        let mut record = self.records.get_mut(&telemetry.ip_address).ok_or_else(|| {
            DomainError::NotFound(format!("No deployment for {}", telemetry.ip_address))
        })?;
        merge_record(&mut record, telemetry);
        Ok(())
    }

    async fn retrieve_by_ip(&self, ip_address: &str) -> Result<Option<Telemetry>, DomainError> {
        Ok(self.records.get(ip_address).map(|r| r.value().clone()))
    }
}
