use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::net::IpAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::errors::ClientError;

pub const DEFAULT_HOME_URL: &str = "http://localhost:8855/telemetry";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2 * 60 * 60);
pub const DEFAULT_IP_ENDPOINTS: &[&str] = &[
    "https://checkip.amazonaws.com/",
    "https://ipinfo.io/ip",
    "https://api.ipify.org/",
];

/// Wire body accepted by `POST /telemetry`.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryPing {
    pub service: String,
    pub ip_address: String,
    pub mainflux_version: String,
    pub last_seen: String,
}

pub struct CallHomeClient {
    service: String,
    version: String,
    home_url: String,
    ip_endpoints: Vec<String>,
    interval: Duration,
    http_client: reqwest::Client,
}

impl CallHomeClient {
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("callhome-client/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Ok(Self {
            service: service.into(),
            version: version.into(),
            home_url: DEFAULT_HOME_URL.to_string(),
            ip_endpoints: DEFAULT_IP_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            interval: DEFAULT_INTERVAL,
            http_client,
        })
    }

    pub fn with_home_url(mut self, home_url: impl Into<String>) -> Self {
        self.home_url = home_url.into();
        self
    }

    pub fn with_ip_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.ip_endpoints = endpoints;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Reports immediately, then once per interval, until `token` is cancelled.
    /// Failures are logged and never end the loop.
    pub async fn run(&self, token: CancellationToken) {
        info!(
            service = %self.service,
            home_url = %self.home_url,
            interval_secs = self.interval.as_secs(),
            "Starting call-home client"
        );

        let mut interval = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("CallHomeClient: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.report().await {
                        warn!(error = %e, "Call-home report failed");
                    }
                }
            }
        }
    }

    /// One discover-then-send cycle.
    #[instrument(skip(self), fields(service = %self.service))]
    pub async fn report(&self) -> Result<(), ClientError> {
        let ip_address = self.discover_ip().await?;
        let ping = TelemetryPing {
            service: self.service.clone(),
            ip_address,
            mainflux_version: self.version.clone(),
            last_seen: Utc::now().to_rfc3339(),
        };
        self.send(&ping).await?;
        info!(ip = %ping.ip_address, "Telemetry reported");
        Ok(())
    }

    /// Tries each endpoint in order and returns the first valid IP answer.
    pub async fn discover_ip(&self) -> Result<String, ClientError> {
        let mut last_error = String::from("no IP endpoints configured");
        for endpoint in &self.ip_endpoints {
            match self.fetch_ip(endpoint).await {
                Ok(ip) => return Ok(ip),
                Err(e) => {
                    debug!(endpoint = %endpoint, error = %e, "IP endpoint failed");
                    last_error = e;
                }
            }
        }
        Err(ClientError::IpDiscovery(last_error))
    }

    async fn fetch_ip(&self, endpoint: &str) -> Result<String, String> {
        let response = self
            .http_client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| format!("fetch error for {}: {}", endpoint, e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP {} for {}", response.status().as_u16(), endpoint));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("read error for {}: {}", endpoint, e))?;
        let candidate = body.trim();
        candidate
            .parse::<IpAddr>()
            .map(|ip| ip.to_string())
            .map_err(|_| format!("{} answered with '{}', not an IP", endpoint, candidate))
    }

    pub async fn send(&self, ping: &TelemetryPing) -> Result<(), ClientError> {
        let body = serde_json::to_vec(ping).map_err(|e| ClientError::Encode(e.to_string()))?;

        let response = self
            .http_client
            .post(&self.home_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
