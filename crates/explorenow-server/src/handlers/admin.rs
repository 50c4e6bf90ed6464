//! Administrative endpoints

use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

/// Drop every cached response body.
pub async fn clear_cache(State(state): State<AppState>) -> Json<Value> {
    let cleared = state.cache.len();
    state.cache.clear();
    info!("Cleared {} cached responses", cleared);
    Json(json!({ "success": true, "cleared": cleared }))
}
