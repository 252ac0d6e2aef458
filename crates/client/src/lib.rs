//! Call-home Client
//!
//! Embedded in deployed instances: discovers the instance's public IP and
//! periodically reports it, together with service name and version, to the
//! collector.
pub mod client;
pub mod errors;

pub use client::{CallHomeClient, TelemetryPing, DEFAULT_HOME_URL, DEFAULT_INTERVAL, DEFAULT_IP_ENDPOINTS};
pub use errors::ClientError;
