use axum::{
    extract::{Query, State},
    response::Html,
};
use callhome_domain::DomainError;

use crate::{errors::ApiError, state::AppState, utils::TelemetryQuery};

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<TelemetryQuery>,
) -> Result<Html<String>, ApiError> {
    let filters = params.filters()?;
    let body = state.dashboard.execute(filters).await?;
    let html = String::from_utf8(body)
        .map_err(|e| ApiError(DomainError::RenderError(e.to_string())))?;
    Ok(Html(html))
}
