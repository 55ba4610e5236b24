use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::main_lib::AppState;

/// Which recognised options are set. Values are never returned.
async fn get_env(State(state): State<Arc<AppState>>) -> Json<BTreeMap<&'static str, bool>> {
    Json(state.options_set.clone())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/debug/env", get(get_env))
}
