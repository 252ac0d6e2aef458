use crate::errors::DomainError;
use crate::telemetry::Telemetry;
use chrono::{DateTime, Utc};

/// Conjunctive predicate over telemetry events. Every unset field is a
/// wildcard; empty strings are treated as unset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryFilters {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub version: Option<String>,
    pub service: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TelemetryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = non_empty(Some(country.into()));
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = non_empty(Some(city.into()));
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(Some(version.into()));
        self
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = non_empty(Some(service.into()));
        self
    }

    /// Drops empty string constraints so that `Some("")` never narrows a query.
    pub fn normalized(self) -> Self {
        Self {
            from: self.from,
            to: self.to,
            country: non_empty(self.country),
            city: non_empty(self.city),
            version: non_empty(self.version),
            service: non_empty(self.service),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none()
            && self.to.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.version.is_none()
            && self.service.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if to < from {
                return Err(DomainError::InvalidDateRange(format!(
                    "'to' ({}) is before 'from' ({})",
                    to.to_rfc3339(),
                    from.to_rfc3339()
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, telemetry: &Telemetry) -> bool {
        fn eq(constraint: &Option<String>, value: &str) -> bool {
            match constraint.as_deref() {
                Some(c) if !c.is_empty() => c == value,
                _ => true,
            }
        }

        self.from.map_or(true, |from| telemetry.last_seen >= from)
            && self.to.map_or(true, |to| telemetry.last_seen <= to)
            && eq(&self.country, &telemetry.country)
            && eq(&self.city, &telemetry.city)
            && eq(&self.version, &telemetry.version)
            && eq(&self.service, &telemetry.service)
    }
}
