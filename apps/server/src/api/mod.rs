use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{config::Config, main_lib::AppState};

mod debug;
mod estimate;
mod gemguide;
mod health;
mod metal_price;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::healthz,
        estimate::create_estimate,
        gemguide::gemguide_stub,
        metal_price::get_metal_price,
    ),
    tags((name = "gemassure"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let mut api = Router::new()
        .route("/estimate", post(estimate::create_estimate))
        .route("/gemguide", get(gemguide::gemguide_stub))
        .route("/metal-price", get(metal_price::get_metal_price));
    if config.enable_debug_routes {
        tracing::warn!("Debug routes enabled");
        api = api.merge(debug::router());
    }

    Router::new()
        .merge(health::router())
        .nest("/api", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
