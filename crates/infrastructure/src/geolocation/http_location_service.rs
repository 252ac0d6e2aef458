use async_trait::async_trait;
use callhome_application::ports::LocationService;
use callhome_domain::config::GeolocationConfig;
use callhome_domain::{DomainError, Location};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Body of an ip-api style lookup.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    country: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

pub struct HttpLocationService {
    config: GeolocationConfig,
    http_client: reqwest::Client,
}

impl HttpLocationService {
    pub fn new(config: GeolocationConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("callhome/", env!("CARGO_PKG_VERSION"), " (geolocation)"))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn fetch(&self, url: &str) -> Result<String, String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("fetch error for {}: {}", url, e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP {} for {}", response.status().as_u16(), url));
        }

        response
            .text()
            .await
            .map_err(|e| format!("read error for {}: {}", url, e))
    }
}

#[async_trait]
impl LocationService for HttpLocationService {
    #[instrument(skip(self))]
    async fn get_location(&self, ip_address: &str) -> Result<Location, DomainError> {
        let url = self.config.url_for(ip_address);

        let body = self.fetch(&url).await.map_err(|e| {
            warn!(error = %e, "Geolocation request failed");
            DomainError::LocationLookupFailed(e)
        })?;

        let lookup: LookupResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Geolocation response is not valid JSON");
            DomainError::LocationLookupFailed(format!("invalid response: {}", e))
        })?;

        if lookup.status != "success" {
            let reason = lookup.message.unwrap_or_else(|| lookup.status.clone());
            warn!(reason = %reason, "Geolocation lookup rejected");
            return Err(DomainError::LocationLookupFailed(format!(
                "lookup for {} failed: {}",
                ip_address, reason
            )));
        }

        debug!(country = %lookup.country, city = %lookup.city, "Location resolved");
        Ok(Location {
            country: lookup.country,
            city: lookup.city,
            latitude: lookup.lat,
            longitude: lookup.lon,
        })
    }
}
