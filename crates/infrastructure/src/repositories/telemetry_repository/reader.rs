use super::helpers::{build_filter_clause, row_to_telemetry, FilterClause};
use crate::repositories::deployment_repository::decode_services;
use crate::repositories::errors::map_read_error;
use callhome_domain::{
    CountrySummary, DomainError, PageMetadata, Telemetry, TelemetryFilters, TelemetryPage,
    TelemetrySummary,
};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::{debug, instrument};

const EVENT_COLUMNS: &str =
    "id, event_time, service_time, ip_address, longitude, latitude, version, service, country, city";

/// CTE ranking matching rows per IP, newest first; `rn = 1` is the
/// representative row of each deployment.
fn latest_per_ip_cte(clause: &FilterClause) -> String {
    format!(
        "WITH ranked AS (
            SELECT {cols},
                   ROW_NUMBER() OVER (
                       PARTITION BY ip_address ORDER BY event_time DESC, id DESC
                   ) AS rn
            FROM telemetry_events{filter}
         )",
        cols = EVENT_COLUMNS,
        filter = clause.sql
    )
}

#[instrument(skip(pool))]
pub(super) async fn retrieve_all(
    pool: &SqlitePool,
    page: &PageMetadata,
    filters: &TelemetryFilters,
) -> Result<TelemetryPage, DomainError> {
    let clause = build_filter_clause(filters);

    let count_sql = format!(
        "SELECT COUNT(DISTINCT ip_address) AS total FROM telemetry_events{}",
        clause.sql
    );
    let mut count_query = sqlx::query(&count_sql);
    for bind in &clause.binds {
        count_query = count_query.bind(bind);
    }
    let total: i64 = count_query
        .fetch_one(pool)
        .await
        .map_err(|e| map_read_error(e, "count deployments"))?
        .get("total");

    let page_sql = format!(
        "{cte}
         SELECT {cols} FROM ranked
         WHERE rn = 1
         ORDER BY event_time DESC, id DESC
         LIMIT ? OFFSET ?",
        cte = latest_per_ip_cte(&clause),
        cols = EVENT_COLUMNS
    );
    let mut page_query = sqlx::query(&page_sql);
    for bind in &clause.binds {
        page_query = page_query.bind(bind);
    }
    let rows = page_query
        .bind(clamp_i64(page.limit))
        .bind(clamp_i64(page.offset))
        .fetch_all(pool)
        .await
        .map_err(|e| map_read_error(e, "fetch telemetry page"))?;

    let mut telemetry = rows
        .iter()
        .map(row_to_telemetry)
        .collect::<Result<Vec<Telemetry>, DomainError>>()?;

    let ips: Vec<&str> = telemetry.iter().map(|t| t.ip_address.as_str()).collect();
    let mut services = services_by_ip(pool, &ips).await?;
    for t in &mut telemetry {
        t.services = services.remove(&t.ip_address).unwrap_or_default();
    }

    debug!(total, returned = telemetry.len(), "Telemetry page fetched");

    Ok(TelemetryPage {
        metadata: PageMetadata {
            total: total.max(0) as u64,
            offset: page.offset,
            limit: page.limit,
        },
        telemetry,
    })
}

/// Every service ever reported by each IP. The accumulated list from the
/// `deployments` table comes first, since it outlives retention pruning;
/// services seen only in surviving events are appended in first-seen order.
async fn services_by_ip(
    pool: &SqlitePool,
    ips: &[&str],
) -> Result<HashMap<String, Vec<String>>, DomainError> {
    let mut services: HashMap<String, Vec<String>> = HashMap::new();
    if ips.is_empty() {
        return Ok(services);
    }

    // SQLite caps bound parameters at 999 on older builds.
    for chunk in ips.chunks(900) {
        let placeholders = vec!["?"; chunk.len()].join(",");

        let sql = format!(
            "SELECT ip_address, services FROM deployments WHERE ip_address IN ({})",
            placeholders
        );
        let mut query = sqlx::query(&sql);
        for ip in chunk {
            query = query.bind(*ip);
        }
        let rows = query
            .fetch_all(pool)
            .await
            .map_err(|e| map_read_error(e, "fetch accumulated services"))?;
        for row in rows {
            let raw: String = row.get("services");
            services.insert(row.get("ip_address"), decode_services(&raw)?);
        }

        let sql = format!(
            "SELECT ip_address, service, MIN(id) AS first_id
             FROM telemetry_events
             WHERE ip_address IN ({}) AND service <> ''
             GROUP BY ip_address, service
             ORDER BY ip_address, first_id",
            placeholders
        );
        let mut query = sqlx::query(&sql);
        for ip in chunk {
            query = query.bind(*ip);
        }
        let rows = query
            .fetch_all(pool)
            .await
            .map_err(|e| map_read_error(e, "fetch services per deployment"))?;

        for row in rows {
            let service: String = row.get("service");
            let known = services.entry(row.get("ip_address")).or_default();
            if !known.contains(&service) {
                known.push(service);
            }
        }
    }

    Ok(services)
}

#[instrument(skip(pool))]
pub(super) async fn retrieve_summary(
    pool: &SqlitePool,
    filters: &TelemetryFilters,
) -> Result<TelemetrySummary, DomainError> {
    let clause = build_filter_clause(filters);

    let sql = format!(
        "{cte}
         SELECT country, COUNT(*) AS deployments FROM ranked
         WHERE rn = 1
         GROUP BY country",
        cte = latest_per_ip_cte(&clause)
    );
    let mut query = sqlx::query(&sql);
    for bind in &clause.binds {
        query = query.bind(bind);
    }
    let countries = query
        .fetch_all(pool)
        .await
        .map_err(|e| map_read_error(e, "summarize deployments"))?
        .into_iter()
        .map(|row| CountrySummary {
            country: row.get("country"),
            deployments: row.get::<i64, _>("deployments").max(0) as u64,
        })
        .collect();

    let cities = distinct_values(pool, "city", &clause).await?;
    let versions = distinct_values(pool, "version", &clause).await?;
    let services = distinct_values(pool, "service", &clause).await?;

    let summary =
        TelemetrySummary::from_countries(countries).with_options(cities, versions, services);
    debug!(
        countries = summary.countries.len(),
        total_deployments = summary.total_deployments,
        "Telemetry summary computed"
    );
    Ok(summary)
}

async fn distinct_values(
    pool: &SqlitePool,
    column: &'static str,
    clause: &FilterClause,
) -> Result<Vec<String>, DomainError> {
    let extra = if clause.sql.is_empty() { " WHERE " } else { " AND " };
    let sql = format!(
        "SELECT DISTINCT {col} AS value FROM telemetry_events{filter}{extra}{col} <> '' ORDER BY {col}",
        col = column,
        filter = clause.sql,
        extra = extra
    );
    let mut query = sqlx::query(&sql);
    for bind in &clause.binds {
        query = query.bind(bind);
    }
    let rows = query
        .fetch_all(pool)
        .await
        .map_err(|e| map_read_error(e, "list distinct values"))?;

    Ok(rows.into_iter().map(|row| row.get("value")).collect())
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
