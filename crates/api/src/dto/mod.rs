pub mod summary;
pub mod telemetry;

pub use summary::{CountrySummaryResponse, SummaryResponse};
pub use telemetry::{SaveTelemetryRequest, TelemetryPageResponse, TelemetryResponse};
