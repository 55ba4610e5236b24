use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    status: &'static str,
    has_api_key: bool,
    has_metal_api_key: bool,
}

#[utoipa::path(get, path = "/", responses((status = 200, description = "Liveness text")))]
pub async fn root() -> &'static str {
    "GemAssure API is live and working!"
}

/// Liveness plus whether each upstream has credentials. Never exposes the keys.
#[utoipa::path(get, path = "/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        has_api_key: state.gem_provider.is_configured(),
        has_metal_api_key: state.metal_provider.is_configured(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
}
