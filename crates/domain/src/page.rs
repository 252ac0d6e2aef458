use crate::errors::DomainError;
use crate::telemetry::Telemetry;

pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const MAX_PAGE_LIMIT: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageMetadata {
    /// Computed by the repository; ignored on input.
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl PageMetadata {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            total: 0,
            offset,
            limit,
        }
    }

    /// Bounds check applied to operator requests. Internal callers such as
    /// the dashboard may use larger pages and skip this.
    pub fn validate(&self, max_limit: u64) -> Result<(), DomainError> {
        if self.limit < 1 || self.limit > max_limit {
            return Err(DomainError::InvalidPagination(format!(
                "limit must be between 1 and {}, got {}",
                max_limit, self.limit
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryPage {
    pub metadata: PageMetadata,
    pub telemetry: Vec<Telemetry>,
}

impl TelemetryPage {
    pub fn empty(request: PageMetadata) -> Self {
        Self {
            metadata: PageMetadata { total: 0, ..request },
            telemetry: Vec::new(),
        }
    }

    pub fn total(&self) -> u64 {
        self.metadata.total
    }
}
