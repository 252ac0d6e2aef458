pub mod query;

pub use query::{parse_rfc3339, TelemetryQuery};
