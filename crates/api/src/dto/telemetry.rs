use callhome_domain::{DomainError, Telemetry, TelemetryPage};
use serde::{Deserialize, Serialize};

use crate::utils::parse_rfc3339;

/// Ping body sent by deployed instances. Older clients send the version as
/// `mainflux_version`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTelemetryRequest {
    pub service: String,
    pub ip_address: String,
    #[serde(alias = "mainflux_version")]
    pub version: String,
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl SaveTelemetryRequest {
    pub fn into_telemetry(self) -> Result<Telemetry, DomainError> {
        let mut telemetry = Telemetry::new(
            self.ip_address.trim(),
            self.service.trim(),
            self.version.trim(),
        );
        if let Some(raw) = self.last_seen.as_deref().filter(|s| !s.trim().is_empty()) {
            let service_time = parse_rfc3339("last_seen", raw.trim())
                .map_err(|e| DomainError::InvalidTelemetry(e.to_string()))?;
            telemetry = telemetry.with_service_time(service_time);
        }
        Ok(telemetry)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryResponse {
    pub ip_address: String,
    pub service: String,
    pub services: Vec<String>,
    pub version: String,
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub last_seen: String,
    pub service_time: Option<String>,
}

impl TelemetryResponse {
    pub fn from_telemetry(t: Telemetry) -> Self {
        Self {
            ip_address: t.ip_address,
            service: t.service,
            services: t.services,
            version: t.version,
            country: t.country,
            city: t.city,
            latitude: t.latitude,
            longitude: t.longitude,
            last_seen: t.last_seen.to_rfc3339(),
            service_time: t.service_time.map(|s| s.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryPageResponse {
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
    pub telemetry: Vec<TelemetryResponse>,
}

impl TelemetryPageResponse {
    pub fn from_page(page: TelemetryPage) -> Self {
        Self {
            total: page.metadata.total,
            offset: page.metadata.offset,
            limit: page.metadata.limit,
            telemetry: page
                .telemetry
                .into_iter()
                .map(TelemetryResponse::from_telemetry)
                .collect(),
        }
    }
}
