use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("IP discovery failed: {0}")]
    IpDiscovery(String),

    #[error("Collector rejected telemetry: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Failed to encode telemetry: {0}")]
    Encode(String),
}
