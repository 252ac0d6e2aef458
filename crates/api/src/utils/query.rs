use callhome_domain::{
    DomainError, PageMetadata, TelemetryFilters, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Query string shared by the listing, summary and dashboard endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetryQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub version: Option<String>,
    pub service: Option<String>,
}

pub fn parse_rfc3339(field: &str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            DomainError::InvalidDateRange(format!(
                "'{}' must be an RFC 3339 timestamp, got '{}': {}",
                field, raw, e
            ))
        })
}

fn parse_bound(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, DomainError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => parse_rfc3339(field, value).map(Some),
        None => Ok(None),
    }
}

impl TelemetryQuery {
    pub fn page(&self) -> Result<PageMetadata, DomainError> {
        let page = PageMetadata::new(
            self.offset.unwrap_or(0),
            self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        );
        page.validate(MAX_PAGE_LIMIT)?;
        Ok(page)
    }

    pub fn filters(&self) -> Result<TelemetryFilters, DomainError> {
        let filters = TelemetryFilters {
            from: parse_bound("from", self.from.as_deref())?,
            to: parse_bound("to", self.to.as_deref())?,
            country: self.country.clone(),
            city: self.city.clone(),
            version: self.version.clone(),
            service: self.service.clone(),
        }
        .normalized();
        filters.validate()?;
        Ok(filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q = TelemetryQuery::default();
        let page = q.page().unwrap();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert!(q.filters().unwrap().is_empty());
    }

    #[test]
    fn test_limit_bounds() {
        let q = |limit| TelemetryQuery {
            limit: Some(limit),
            ..Default::default()
        };
        assert!(q(1).page().is_ok());
        assert!(q(100).page().is_ok());
        assert!(matches!(
            q(0).page(),
            Err(DomainError::InvalidPagination(_))
        ));
        assert!(matches!(
            q(101).page(),
            Err(DomainError::InvalidPagination(_))
        ));
    }

    #[test]
    fn test_rfc3339_bounds() {
        let q = TelemetryQuery {
            from: Some("2023-01-01T00:00:00Z".to_string()),
            to: Some("2023-01-31T00:00:00+02:00".to_string()),
            ..Default::default()
        };
        let filters = q.filters().unwrap();
        assert_eq!(
            filters.to.unwrap().to_rfc3339(),
            "2023-01-30T22:00:00+00:00"
        );

        let bad = TelemetryQuery {
            from: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad.filters(),
            Err(DomainError::InvalidDateRange(_))
        ));
    }

    #[test]
    fn test_to_before_from_rejected() {
        let q = TelemetryQuery {
            from: Some("2023-02-01T00:00:00Z".to_string()),
            to: Some("2023-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        assert!(q.filters().is_err());
    }
}
