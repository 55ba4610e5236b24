use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use gemassure_pricing::MetalSymbol;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

const DEFAULT_BASE: &str = "USD";

#[derive(Deserialize)]
pub struct MetalPriceQuery {
    base: Option<String>,
    symbols: Option<String>,
}

fn parse_symbols(raw: Option<&str>) -> ApiResult<Vec<MetalSymbol>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(MetalSymbol::ALL.to_vec());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|e| ApiError::BadRequest(format!("{}", e))))
        .collect()
}

/// Pass-through of the latest spot rates for the requested metals.
#[utoipa::path(
    get,
    path = "/api/metal-price",
    params(
        ("base" = Option<String>, Query, description = "Base currency, default USD"),
        ("symbols" = Option<String>, Query, description = "Comma-separated metal symbols"),
    ),
    responses(
        (status = 200, description = "Raw upstream payload"),
        (status = 400, description = "Unsupported metal symbol"),
        (status = 500, description = "Upstream failure"),
    )
)]
pub async fn get_metal_price(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MetalPriceQuery>,
) -> ApiResult<Json<Value>> {
    let base = query
        .base
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .unwrap_or(DEFAULT_BASE)
        .to_ascii_uppercase();
    let symbols = parse_symbols(query.symbols.as_deref())?;

    state
        .metal_provider
        .get_latest_raw(&base, &symbols)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Metal price lookup failed: {}", e);
            ApiError::Internal(e.to_string())
        })
}
