use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_dashboard))
        .route("/health", get(handlers::health_check))
        .merge(handlers::telemetry::routes())
        .merge(handlers::deployments::routes())
        .with_state(state)
}
