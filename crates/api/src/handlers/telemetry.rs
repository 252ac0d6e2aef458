use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::{debug, info};

use crate::{
    dto::{SaveTelemetryRequest, SummaryResponse, TelemetryPageResponse},
    errors::ApiError,
    state::AppState,
    utils::TelemetryQuery,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/telemetry", post(save_telemetry))
        .route("/telemetry", get(get_telemetry))
        .route("/telemetry/summary", get(get_summary))
}

async fn save_telemetry(
    State(state): State<AppState>,
    Json(request): Json<SaveTelemetryRequest>,
) -> Result<StatusCode, ApiError> {
    let telemetry = request.into_telemetry()?;
    let ip = telemetry.ip_address.clone();
    state.telemetry.save.execute(telemetry).await?;
    info!(ip = %ip, "Telemetry accepted");
    Ok(StatusCode::CREATED)
}

async fn get_telemetry(
    State(state): State<AppState>,
    Query(params): Query<TelemetryQuery>,
) -> Result<Json<TelemetryPageResponse>, ApiError> {
    let page = params.page()?;
    let filters = params.filters()?;
    let result = state.telemetry.retrieve.execute(page, filters).await?;
    debug!(
        count = result.telemetry.len(),
        total = result.metadata.total,
        "Telemetry retrieved successfully"
    );
    Ok(Json(TelemetryPageResponse::from_page(result)))
}

async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<TelemetryQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let filters = params.filters()?;
    let summary = state.telemetry.summary.execute(filters).await?;
    Ok(Json(summary.into()))
}
