use super::errors::{map_read_error, map_write_error};
use super::telemetry_repository::{format_timestamp, parse_timestamp};
use async_trait::async_trait;
use callhome_application::ports::DeploymentRepository;
use callhome_domain::{DomainError, Telemetry};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, instrument};

/// Aggregate-by-IP store backed by the `deployments` table.
pub struct SqliteDeploymentRepository {
    pool: SqlitePool,
}

impl SqliteDeploymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn encode_services(services: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(services).map_err(|e| DomainError::InvalidEvent(e.to_string()))
}

pub(crate) fn decode_services(raw: &str) -> Result<Vec<String>, DomainError> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::InvalidEvent(format!("bad services column '{}': {}", raw, e)))
}

fn row_to_deployment(row: &SqliteRow) -> Result<Telemetry, DomainError> {
    let services: String = row.get("services");
    let last_seen: String = row.get("last_seen");
    let service_time = row
        .get::<Option<String>, _>("service_time")
        .map(|raw| parse_timestamp(&raw))
        .transpose()?;

    Ok(Telemetry {
        ip_address: row.get("ip_address"),
        service: row.get("service"),
        services: decode_services(&services)?,
        version: row.get("version"),
        country: row.get("country"),
        city: row.get("city"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        last_seen: parse_timestamp(&last_seen)?,
        service_time,
    })
}

/// Unions the stored service list with the incoming one and overwrites the
/// remaining fields. Returns the merged list length, or `None` when no row
/// exists for the IP.
async fn merge_into(
    tx: &mut Transaction<'_, Sqlite>,
    telemetry: &Telemetry,
) -> Result<Option<usize>, DomainError> {
    let stored: Option<String> =
        sqlx::query_scalar("SELECT services FROM deployments WHERE ip_address = ?")
            .bind(&telemetry.ip_address)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| map_write_error(e, "read deployment services"))?;

    let Some(stored) = stored else {
        return Ok(None);
    };

    let mut services = decode_services(&stored)?;
    for service in &telemetry.services {
        if !services.contains(service) {
            services.push(service.clone());
        }
    }

    sqlx::query(
        "UPDATE deployments
         SET services = ?, service = ?, version = ?, country = ?, city = ?,
             latitude = ?, longitude = ?, last_seen = ?, service_time = ?, updated_at = ?
         WHERE ip_address = ?",
    )
    .bind(encode_services(&services)?)
    .bind(&telemetry.service)
    .bind(&telemetry.version)
    .bind(&telemetry.country)
    .bind(&telemetry.city)
    .bind(telemetry.latitude)
    .bind(telemetry.longitude)
    .bind(format_timestamp(&telemetry.last_seen))
    .bind(telemetry.service_time.as_ref().map(format_timestamp))
    .bind(format_timestamp(&Utc::now()))
    .bind(&telemetry.ip_address)
    .execute(&mut **tx)
    .await
    .map_err(|e| map_write_error(e, "update deployment"))?;

    Ok(Some(services.len()))
}

#[async_trait]
impl DeploymentRepository for SqliteDeploymentRepository {
    /// Inserts the record, or merges into it when another writer created the
    /// same IP first. Both paths run in one transaction.
    #[instrument(skip(self, telemetry), fields(ip = %telemetry.ip_address))]
    async fn save(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        let now = format_timestamp(&Utc::now());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_write_error(e, "begin deployment insert"))?;

        let inserted = sqlx::query(
            "INSERT INTO deployments
                (ip_address, services, service, version, country, city, latitude, longitude,
                 last_seen, service_time, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(ip_address) DO NOTHING",
        )
        .bind(&telemetry.ip_address)
        .bind(encode_services(&telemetry.services)?)
        .bind(&telemetry.service)
        .bind(&telemetry.version)
        .bind(&telemetry.country)
        .bind(&telemetry.city)
        .bind(telemetry.latitude)
        .bind(telemetry.longitude)
        .bind(format_timestamp(&telemetry.last_seen))
        .bind(telemetry.service_time.as_ref().map(format_timestamp))
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "insert deployment"))?
        .rows_affected();

        if inserted == 0 {
            let merged = merge_into(&mut tx, telemetry).await?;
            debug!(services = ?merged, "Deployment already existed, services merged");
        } else {
            info!(services = telemetry.services.len(), "Deployment created");
        }

        tx.commit()
            .await
            .map_err(|e| map_write_error(e, "commit deployment insert"))?;
        Ok(())
    }

    /// The stored service list is re-read and unioned inside a transaction,
    /// so a concurrent writer in another process cannot drop services.
    #[instrument(skip(self, telemetry), fields(ip = %telemetry.ip_address))]
    async fn update(&self, telemetry: &Telemetry) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_write_error(e, "begin deployment update"))?;

        let Some(services) = merge_into(&mut tx, telemetry).await? else {
            return Err(DomainError::NotFound(format!(
                "No deployment for {}",
                telemetry.ip_address
            )));
        };

        tx.commit()
            .await
            .map_err(|e| map_write_error(e, "commit deployment update"))?;

        debug!(services, "Deployment updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn retrieve_by_ip(&self, ip_address: &str) -> Result<Option<Telemetry>, DomainError> {
        let row = sqlx::query(
            "SELECT ip_address, services, service, version, country, city, latitude, longitude,
                    last_seen, service_time
             FROM deployments WHERE ip_address = ?",
        )
        .bind(ip_address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_read_error(e, "fetch deployment"))?;

        row.as_ref().map(row_to_deployment).transpose()
    }
}
