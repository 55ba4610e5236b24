use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use gemassure_core::estimate::{EstimateRequest, EstimateResponse};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

/// Keep whatever the caller sent so a rejected body can still be logged.
fn raw_body(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[utoipa::path(
    post,
    path = "/api/estimate",
    responses(
        (status = 200, description = "Estimate computed"),
        (status = 400, description = "Invalid request or input rejected by the gem guide"),
        (status = 502, description = "Upstream failure"),
        (status = 503, description = "Upstream not configured"),
        (status = 504, description = "Upstream timed out"),
    )
)]
pub async fn create_estimate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<EstimateResponse>> {
    let result = match serde_json::from_slice::<EstimateRequest>(&body) {
        Ok(request) => {
            // Detached: the estimate must finish and log even if the request
            // timeout drops this handler.
            let service = state.estimate_service.clone();
            tokio::spawn(async move { service.compute_estimate(request).await })
                .await
                .map_err(|e| ApiError::Internal(format!("Estimate task failed: {}", e)))?
        }
        Err(e) => Err(state
            .estimate_service
            .reject_request(raw_body(&body), e.to_string())
            .await),
    };

    result.map(Json).map_err(|failure| ApiError::Estimate {
        failure,
        legacy_status: state.legacy_error_status,
    })
}
