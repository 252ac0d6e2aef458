use callhome_domain::TelemetrySummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySummaryResponse {
    pub country: String,
    pub deployments: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub countries: Vec<CountrySummaryResponse>,
    pub cities: Vec<String>,
    pub versions: Vec<String>,
    pub services: Vec<String>,
    pub total_deployments: u64,
}

impl From<TelemetrySummary> for SummaryResponse {
    fn from(s: TelemetrySummary) -> Self {
        Self {
            countries: s
                .countries
                .into_iter()
                .map(|c| CountrySummaryResponse {
                    country: c.country,
                    deployments: c.deployments,
                })
                .collect(),
            cities: s.cities,
            versions: s.versions,
            services: s.services,
            total_deployments: s.total_deployments,
        }
    }
}
