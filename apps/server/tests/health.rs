use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use gemassure_server::{api::app_router, build_state, config::Config};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_app(pairs: &[(&str, &str)]) -> (Router, TempDir) {
    let dir = tempdir().unwrap();
    let mut vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.insert(
        "ESTIMATE_LOG_PATH".to_string(),
        dir.path().join("estimates.jsonl").to_string_lossy().into_owned(),
    );
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), dir)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn root_is_live() {
    let (app, _dir) = build_app(&[]).await;

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"GemAssure API is live and working!");
}

#[tokio::test]
async fn healthz_reports_key_presence_only() {
    let (app, _dir) = build_app(&[
        ("GEMGUIDE_BASE_URL", "http://127.0.0.1:9"),
        ("GEMGUIDE_API_KEY", "secret-gem-key"),
    ])
    .await;

    let (status, body) = get(&app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("secret-gem-key"));
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["hasApiKey"], true);
    assert_eq!(json["hasMetalApiKey"], false);
}

#[tokio::test]
async fn gemguide_is_not_implemented() {
    let (app, _dir) = build_app(&[]).await;

    let (status, body) = get(&app, "/api/gemguide").await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["message"].as_str().unwrap().contains("GemGuide"));
}

#[tokio::test]
async fn debug_routes_are_off_by_default() {
    let (app, _dir) = build_app(&[]).await;

    let (status, _) = get(&app, "/api/debug/env").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn debug_env_lists_options_without_values() {
    let (app, _dir) = build_app(&[
        ("ENABLE_DEBUG_ROUTES", "true"),
        ("METALPRICE_API_KEY", "secret-metal-key"),
    ])
    .await;

    let (status, body) = get(&app, "/api/debug/env").await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("secret-metal-key"));
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["METALPRICE_API_KEY"], true);
    assert_eq!(json["ENABLE_DEBUG_ROUTES"], true);
    assert_eq!(json["GEMGUIDE_API_KEY"], false);
}

#[tokio::test]
async fn openapi_lists_routes() {
    let (app, _dir) = build_app(&[]).await;

    let (status, body) = get(&app, "/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    for route in ["/", "/healthz", "/api/estimate", "/api/metal-price", "/api/gemguide"] {
        assert!(json["paths"].get(route).is_some(), "missing {}", route);
    }
}

#[tokio::test]
async fn request_id_is_propagated() {
    let (app, _dir) = build_app(&[]).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
