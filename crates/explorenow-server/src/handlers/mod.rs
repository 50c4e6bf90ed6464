//! HTTP handlers

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod documents;
pub mod hotels;
pub mod performance;
pub mod reviews;
pub mod tools;
pub mod trips;
pub mod users;

use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use serde_json::{json, Value};

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.backend,
    }))
}

/// Unmatched `/api/` paths; keeps them out of the SPA fallback.
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound("Endpoint")
}

/// Serialize once so cache hits return byte-identical bodies.
pub(crate) fn to_json_bytes<T: Serialize>(value: &T) -> Result<Bytes, ApiError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize response: {}", e)))
}

pub(crate) fn json_response(body: Bytes) -> Response {
    ([(CONTENT_TYPE, "application/json")], body).into_response()
}
