use callhome_domain::{DomainError, Telemetry};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::ports::{DeploymentRepository, LocationService, TelemetryRepository};
use crate::services::IpMergeLocks;

/// Use case: record one call-home ping.
///
/// Every successful call appends exactly one event-log row and performs
/// exactly one aggregate insert or update for the reporting IP.
pub struct SaveTelemetryUseCase {
    event_log: Arc<dyn TelemetryRepository>,
    deployments: Arc<dyn DeploymentRepository>,
    location: Arc<dyn LocationService>,
    merge_locks: Arc<IpMergeLocks>,
}

impl SaveTelemetryUseCase {
    pub fn new(
        event_log: Arc<dyn TelemetryRepository>,
        deployments: Arc<dyn DeploymentRepository>,
        location: Arc<dyn LocationService>,
    ) -> Self {
        Self {
            event_log,
            deployments,
            location,
            merge_locks: Arc::new(IpMergeLocks::new()),
        }
    }

    /// Shares merge locks with other instances serving the same stores.
    pub fn with_merge_locks(mut self, merge_locks: Arc<IpMergeLocks>) -> Self {
        self.merge_locks = merge_locks;
        self
    }

    #[instrument(skip(self, telemetry), fields(ip = %telemetry.ip_address, service = %telemetry.service))]
    pub async fn execute(&self, mut telemetry: Telemetry) -> Result<(), DomainError> {
        telemetry.canonicalize()?;

        let location = self
            .location
            .get_location(&telemetry.ip_address)
            .await
            .map_err(|e| {
                error!(error = %e, "Geolocation failed");
                e.with_context("save telemetry: geolocation")
            })?;

        telemetry.apply_location(location);
        telemetry.last_seen = Utc::now();

        self.event_log.save(&telemetry).await.map_err(|e| {
            error!(error = %e, "Failed to append telemetry event");
            e.with_context("save telemetry: event log")
        })?;

        let _guard = self.merge_locks.lock(&telemetry.ip_address).await;

        let existing = self
            .deployments
            .retrieve_by_ip(&telemetry.ip_address)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to look up deployment");
                e.with_context("save telemetry: deployment lookup")
            })?;

        match existing {
            None => {
                telemetry.services = vec![telemetry.service.clone()];
                self.deployments.save(&telemetry).await.map_err(|e| {
                    error!(error = %e, "Failed to create deployment");
                    e.with_context("save telemetry: deployment create")
                })?;
                info!(country = %telemetry.country, "New deployment recorded");
            }
            Some(existing) => {
                telemetry.services = existing.services;
                let grew = telemetry.merge_service(&telemetry.service.clone());
                self.deployments.update(&telemetry).await.map_err(|e| {
                    error!(error = %e, "Failed to update deployment");
                    e.with_context("save telemetry: deployment update")
                })?;
                debug!(services = telemetry.services.len(), new_service = grew, "Deployment updated");
            }
        }

        Ok(())
    }
}
