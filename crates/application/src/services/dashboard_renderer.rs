use callhome_domain::{DomainError, Telemetry, TelemetryFilters, TelemetryPage, TelemetrySummary};
use serde::Serialize;

const TEMPLATE: &str = include_str!("../../../../web/templates/dashboard.html");

const DATA_PLACEHOLDER: &str = "{{DASHBOARD_DATA}}";

/// Everything the dashboard page needs, gathered by the use case.
pub struct DashboardData {
    pub filters: TelemetryFilters,
    pub summary: TelemetrySummary,
    /// Unfiltered summary; its option lists populate the filter dropdowns.
    pub options: TelemetrySummary,
    pub page: TelemetryPage,
}

#[derive(Serialize)]
struct DashboardView<'a> {
    filters: FiltersView<'a>,
    total_deployments: u64,
    total_countries: usize,
    countries: Vec<CountryView<'a>>,
    options: OptionsView<'a>,
    telemetry: Vec<DeploymentView<'a>>,
}

#[derive(Serialize)]
struct FiltersView<'a> {
    from: Option<String>,
    to: Option<String>,
    country: Option<&'a str>,
    city: Option<&'a str>,
    version: Option<&'a str>,
    service: Option<&'a str>,
}

#[derive(Serialize)]
struct CountryView<'a> {
    country: &'a str,
    deployments: u64,
}

#[derive(Serialize)]
struct OptionsView<'a> {
    countries: Vec<&'a str>,
    cities: &'a [String],
    versions: &'a [String],
    services: &'a [String],
}

#[derive(Serialize)]
struct DeploymentView<'a> {
    ip_address: &'a str,
    services: &'a [String],
    version: &'a str,
    country: &'a str,
    city: &'a str,
    latitude: f64,
    longitude: f64,
    last_seen: String,
}

impl<'a> From<&'a Telemetry> for DeploymentView<'a> {
    fn from(t: &'a Telemetry) -> Self {
        Self {
            ip_address: &t.ip_address,
            services: &t.services,
            version: &t.version,
            country: &t.country,
            city: &t.city,
            latitude: t.latitude,
            longitude: t.longitude,
            last_seen: t.last_seen.to_rfc3339(),
        }
    }
}

/// Renders the embedded HTML dashboard with its data inlined as JSON.
#[derive(Default)]
pub struct DashboardRenderer;

impl DashboardRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, data: &DashboardData) -> Result<Vec<u8>, DomainError> {
        let view = DashboardView {
            filters: FiltersView {
                from: data.filters.from.map(|t| t.to_rfc3339()),
                to: data.filters.to.map(|t| t.to_rfc3339()),
                country: data.filters.country.as_deref(),
                city: data.filters.city.as_deref(),
                version: data.filters.version.as_deref(),
                service: data.filters.service.as_deref(),
            },
            total_deployments: data.summary.total_deployments,
            total_countries: data.summary.countries.len(),
            countries: data
                .summary
                .countries
                .iter()
                .map(|c| CountryView {
                    country: &c.country,
                    deployments: c.deployments,
                })
                .collect(),
            options: OptionsView {
                countries: data
                    .options
                    .countries
                    .iter()
                    .map(|c| c.country.as_str())
                    .collect(),
                cities: &data.options.cities,
                versions: &data.options.versions,
                services: &data.options.services,
            },
            telemetry: data.page.telemetry.iter().map(DeploymentView::from).collect(),
        };

        let json = serde_json::to_string(&view)
            .map_err(|e| DomainError::RenderError(e.to_string()))?;

        Ok(TEMPLATE
            .replace(DATA_PLACEHOLDER, &escape_script(&json))
            .into_bytes())
    }
}

/// Keeps inlined JSON from terminating the surrounding `<script>` element.
/// `<` only occurs inside JSON strings, where `\u003c` is equivalent.
fn escape_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}
