#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use callhome_api::{create_api_routes, state::TelemetryUseCases, AppState};
use callhome_application::{
    ports::{DeploymentRepository, LocationService, TelemetryRepository},
    use_cases::*,
};
use callhome_domain::{DomainError, Location};
use callhome_infrastructure::repositories::{
    InMemoryDeploymentRepository, InMemoryTelemetryRepository,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct StaticLocationService {
    location: Option<Location>,
}

impl StaticLocationService {
    pub fn belgrade() -> Self {
        Self {
            location: Some(Location {
                country: "Serbia".to_string(),
                city: "Belgrade".to_string(),
                latitude: 44.8125,
                longitude: 20.4612,
            }),
        }
    }

    pub fn failing() -> Self {
        Self { location: None }
    }
}

#[async_trait]
impl LocationService for StaticLocationService {
    async fn get_location(&self, ip_address: &str) -> Result<Location, DomainError> {
        self.location.clone().ok_or_else(|| {
            DomainError::LocationLookupFailed(format!("no answer for {}", ip_address))
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub event_log: Arc<InMemoryTelemetryRepository>,
    pub deployments: Arc<InMemoryDeploymentRepository>,
}

pub fn test_app() -> TestApp {
    test_app_with(Arc::new(StaticLocationService::belgrade()))
}

pub fn test_app_with(location: Arc<dyn LocationService>) -> TestApp {
    let deployments = Arc::new(InMemoryDeploymentRepository::new());
    let event_log = Arc::new(InMemoryTelemetryRepository::new().with_deployments(deployments.clone()));
    let log: Arc<dyn TelemetryRepository> = event_log.clone();
    let aggregate: Arc<dyn DeploymentRepository> = deployments.clone();

    let state = AppState {
        telemetry: TelemetryUseCases {
            save: Arc::new(SaveTelemetryUseCase::new(
                log.clone(),
                aggregate.clone(),
                location,
            )),
            retrieve: Arc::new(RetrieveTelemetryUseCase::new(log.clone())),
            summary: Arc::new(RetrieveSummaryUseCase::new(log.clone())),
            get_deployment: Arc::new(GetDeploymentUseCase::new(aggregate)),
        },
        dashboard: Arc::new(ServeDashboardUseCase::new(log)),
    };

    TestApp {
        router: create_api_routes(state),
        event_log,
        deployments,
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, body) = send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    )
    .await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}
