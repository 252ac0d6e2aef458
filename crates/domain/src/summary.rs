#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySummary {
    pub country: String,
    pub deployments: u64,
}

/// Aggregate view of deployments under one filter.
///
/// `total_deployments` is always the sum of `countries[*].deployments`, which
/// is the number of distinct IPs matching the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TelemetrySummary {
    pub countries: Vec<CountrySummary>,
    pub cities: Vec<String>,
    pub versions: Vec<String>,
    pub services: Vec<String>,
    pub total_deployments: u64,
}

impl TelemetrySummary {
    /// Builds a summary from per-country counts, sorting by deployments
    /// descending then country name ascending.
    pub fn from_countries(mut countries: Vec<CountrySummary>) -> Self {
        countries.sort_by(|a, b| {
            b.deployments
                .cmp(&a.deployments)
                .then_with(|| a.country.cmp(&b.country))
        });
        let total_deployments = countries.iter().map(|c| c.deployments).sum();
        Self {
            countries,
            total_deployments,
            ..Default::default()
        }
    }

    pub fn with_options(
        mut self,
        cities: Vec<String>,
        versions: Vec<String>,
        services: Vec<String>,
    ) -> Self {
        self.cities = cities;
        self.versions = versions;
        self.services = services;
        self
    }
}
