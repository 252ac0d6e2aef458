use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid telemetry: {0}")]
    InvalidTelemetry(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Location lookup failed: {0}")]
    LocationLookupFailed(String),

    #[error("Failed to save event: {0}")]
    SaveEvent(String),

    #[error("Invalid event representation: {0}")]
    InvalidEvent(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Prefixes the message with the operation/phase that produced the error.
    /// The variant is preserved so callers can still match on the kind.
    pub fn with_context(self, context: &str) -> Self {
        let wrap = |msg: String| format!("{}: {}", context, msg);
        match self {
            Self::InvalidTelemetry(m) => Self::InvalidTelemetry(wrap(m)),
            Self::InvalidIpAddress(m) => Self::InvalidIpAddress(wrap(m)),
            Self::InvalidPagination(m) => Self::InvalidPagination(wrap(m)),
            Self::InvalidDateRange(m) => Self::InvalidDateRange(wrap(m)),
            Self::LocationLookupFailed(m) => Self::LocationLookupFailed(wrap(m)),
            Self::SaveEvent(m) => Self::SaveEvent(wrap(m)),
            Self::InvalidEvent(m) => Self::InvalidEvent(wrap(m)),
            Self::DatabaseError(m) => Self::DatabaseError(wrap(m)),
            Self::NotFound(m) => Self::NotFound(wrap(m)),
            Self::RenderError(m) => Self::RenderError(wrap(m)),
            Self::ConfigError(m) => Self::ConfigError(wrap(m)),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTelemetry(_)
                | Self::InvalidIpAddress(_)
                | Self::InvalidPagination(_)
                | Self::InvalidDateRange(_)
        )
    }
}
