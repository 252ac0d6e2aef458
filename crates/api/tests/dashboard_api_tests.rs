mod helpers;

use axum::{body::Body, http::Request, http::StatusCode};
use helpers::*;
use serde_json::json;

#[tokio::test]
async fn test_dashboard_renders_html_with_data() {
    let app = test_app();
    post_json(
        &app.router,
        "/telemetry",
        json!({ "service": "users", "ip_address": "10.9.0.1", "version": "0.14.0" }),
    )
    .await;

    let (status, body) = send(
        &app.router,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<title>Call-home Deployments</title>"));
    assert!(html.contains("10.9.0.1"));
    assert!(!html.contains("{{DASHBOARD_DATA}}"));
}

#[tokio::test]
async fn test_dashboard_rejects_bad_date() {
    let app = test_app();

    let (status, _) = send(
        &app.router,
        Request::builder()
            .uri("/?from=yesterday")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
