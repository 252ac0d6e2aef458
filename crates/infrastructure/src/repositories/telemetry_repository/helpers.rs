use callhome_domain::{DomainError, Telemetry, TelemetryFilters};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Fixed-width so that lexical order equals chronological order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| DomainError::InvalidEvent(format!("bad timestamp '{}': {}", raw, e)))
}

pub fn days_ago_cutoff(days: u32) -> String {
    format_timestamp(&(Utc::now() - chrono::Duration::days(days as i64)))
}

/// `WHERE` clause plus positional binds for a set of filters.
pub struct FilterClause {
    pub sql: String,
    pub binds: Vec<String>,
}

pub fn build_filter_clause(filters: &TelemetryFilters) -> FilterClause {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut binds = Vec::new();

    if let Some(from) = &filters.from {
        conditions.push("event_time >= ?");
        binds.push(format_timestamp(from));
    }
    if let Some(to) = &filters.to {
        conditions.push("event_time <= ?");
        binds.push(format_timestamp(to));
    }

    let equals: [(&'static str, &Option<String>); 4] = [
        ("country = ?", &filters.country),
        ("city = ?", &filters.city),
        ("version = ?", &filters.version),
        ("service = ?", &filters.service),
    ];
    for (condition, value) in equals {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            conditions.push(condition);
            binds.push(v.to_string());
        }
    }

    let sql = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    FilterClause { sql, binds }
}

pub fn row_to_telemetry(row: &SqliteRow) -> Result<Telemetry, DomainError> {
    let event_time: String = row.get("event_time");
    let service_time = row
        .get::<Option<String>, _>("service_time")
        .map(|raw| parse_timestamp(&raw))
        .transpose()?;

    Ok(Telemetry {
        ip_address: row.get("ip_address"),
        service: row.get("service"),
        services: Vec::new(),
        version: row.get("version"),
        country: row.get("country"),
        city: row.get("city"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        last_seen: parse_timestamp(&event_time)?,
        service_time,
    })
}
