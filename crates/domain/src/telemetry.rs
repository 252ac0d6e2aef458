use crate::errors::DomainError;
use chrono::{DateTime, Utc};
use std::net::IpAddr;

/// Parses `raw` as an IP address and returns its canonical text
/// (`0:0:0:0:0:0:0:1` becomes `::1`, surrounding whitespace is dropped).
pub fn canonical_ip(raw: &str) -> Result<String, DomainError> {
    raw.trim()
        .parse::<IpAddr>()
        .map(|ip| ip.to_string())
        .map_err(|_| DomainError::InvalidIpAddress(raw.to_string()))
}

/// Geolocation answer for a single IP address.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One call-home ping, enriched with location at save time.
///
/// The same type carries the aggregate-by-IP record, in which case `services`
/// holds every distinct service ever reported from `ip_address`.
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    pub ip_address: String,
    pub service: String,
    pub services: Vec<String>,
    pub version: String,
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Server-side event timestamp.
    pub last_seen: DateTime<Utc>,
    /// Timestamp reported by the instance itself, if any.
    pub service_time: Option<DateTime<Utc>>,
}

impl Telemetry {
    pub fn new(
        ip_address: impl Into<String>,
        service: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            ip_address: ip_address.into(),
            service: service.into(),
            services: Vec::new(),
            version: version.into(),
            country: String::new(),
            city: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            last_seen: Utc::now(),
            service_time: None,
        }
    }

    pub fn with_service_time(mut self, service_time: DateTime<Utc>) -> Self {
        self.service_time = Some(service_time);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.ip_address.trim().is_empty() {
            return Err(DomainError::InvalidTelemetry(
                "ip_address cannot be empty".to_string(),
            ));
        }
        if self.service.trim().is_empty() {
            return Err(DomainError::InvalidTelemetry(
                "service cannot be empty".to_string(),
            ));
        }
        if self.version.trim().is_empty() {
            return Err(DomainError::InvalidTelemetry(
                "version cannot be empty".to_string(),
            ));
        }
        canonical_ip(&self.ip_address)?;
        Ok(())
    }

    /// Validates, then rewrites `ip_address` to its canonical form so that
    /// every spelling of one address maps to the same deployment.
    pub fn canonicalize(&mut self) -> Result<(), DomainError> {
        self.validate()?;
        self.ip_address = canonical_ip(&self.ip_address)?;
        self.service = self.service.trim().to_string();
        self.version = self.version.trim().to_string();
        Ok(())
    }

    /// Overwrites every location field; caller-supplied values are discarded.
    pub fn apply_location(&mut self, location: Location) {
        self.country = location.country;
        self.city = location.city;
        self.latitude = location.latitude;
        self.longitude = location.longitude;
    }

    /// Appends `service` to `services` unless already present.
    /// Returns true when the set grew.
    pub fn merge_service(&mut self, service: &str) -> bool {
        if self.services.iter().any(|s| s == service) {
            return false;
        }
        self.services.push(service.to_string());
        true
    }
}
