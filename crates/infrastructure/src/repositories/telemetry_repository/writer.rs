use super::helpers::{days_ago_cutoff, format_timestamp};
use crate::repositories::errors::map_write_error;
use callhome_domain::{DomainError, Telemetry};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{debug, error, instrument};

const DELETE_BATCH: i64 = 5000;

#[instrument(skip(pool, telemetry), fields(ip = %telemetry.ip_address))]
pub(super) async fn insert_event(pool: &SqlitePool, telemetry: &Telemetry) -> Result<(), DomainError> {
    sqlx::query(
        "INSERT INTO telemetry_events
            (event_time, service_time, ip_address, longitude, latitude, version, service, country, city)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(format_timestamp(&telemetry.last_seen))
    .bind(telemetry.service_time.as_ref().map(format_timestamp))
    .bind(&telemetry.ip_address)
    .bind(telemetry.longitude)
    .bind(telemetry.latitude)
    .bind(&telemetry.version)
    .bind(&telemetry.service)
    .bind(&telemetry.country)
    .bind(&telemetry.city)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, "insert telemetry event"))?;

    debug!("Telemetry event stored");
    Ok(())
}

pub(super) async fn delete_older_than(pool: &SqlitePool, days: u32) -> Result<u64, DomainError> {
    let cutoff = days_ago_cutoff(days);
    let mut total_deleted: u64 = 0;

    loop {
        let result = sqlx::query(
            "DELETE FROM telemetry_events WHERE id IN
                (SELECT id FROM telemetry_events WHERE event_time < ? LIMIT ?)",
        )
        .bind(&cutoff)
        .bind(DELETE_BATCH)
        .execute(pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to delete old telemetry events");
            DomainError::DatabaseError(format!("Failed to delete old telemetry events: {}", e))
        })?;

        let deleted = result.rows_affected();
        if deleted == 0 {
            break;
        }
        total_deleted += deleted;
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    Ok(total_deleted)
}
