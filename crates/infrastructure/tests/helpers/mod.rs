#![allow(dead_code)]

use callhome_domain::Telemetry;
use callhome_infrastructure::database::run_migrations;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Single connection so every query sees the same in-memory database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, day, hour, 0, 0).unwrap()
}

pub fn event(
    ip: &str,
    service: &str,
    version: &str,
    country: &str,
    city: &str,
    last_seen: DateTime<Utc>,
) -> Telemetry {
    let mut t = Telemetry::new(ip, service, version);
    t.country = country.to_string();
    t.city = city.to_string();
    t.latitude = 44.8;
    t.longitude = 20.46;
    t.last_seen = last_seen;
    t
}
