use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::{dto::TelemetryResponse, errors::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/deployments/{ip}", get(get_deployment))
}

async fn get_deployment(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> Result<Json<TelemetryResponse>, ApiError> {
    let deployment = state.telemetry.get_deployment.execute(&ip).await?;
    Ok(Json(TelemetryResponse::from_telemetry(deployment)))
}
