#![allow(dead_code)]
use callhome_domain::Telemetry;
use chrono::{DateTime, TimeZone, Utc};

pub struct TelemetryBuilder {
    ip_address: String,
    service: String,
    version: String,
    country: String,
    city: String,
    last_seen: DateTime<Utc>,
}

impl TelemetryBuilder {
    pub fn new() -> Self {
        Self {
            ip_address: "203.0.113.10".to_string(),
            service: "users".to_string(),
            version: "0.14.0".to_string(),
            country: "Serbia".to_string(),
            city: "Belgrade".to_string(),
            last_seen: Utc.with_ymd_and_hms(2023, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    pub fn ip(mut self, ip: &str) -> Self {
        self.ip_address = ip.to_string();
        self
    }

    pub fn service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = city.to_string();
        self
    }

    pub fn last_seen(mut self, last_seen: DateTime<Utc>) -> Self {
        self.last_seen = last_seen;
        self
    }

    pub fn build(self) -> Telemetry {
        let mut t = Telemetry::new(self.ip_address, self.service, self.version);
        t.country = self.country;
        t.city = self.city;
        t.last_seen = self.last_seen;
        t
    }
}
