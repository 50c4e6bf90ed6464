//! Latency report endpoints

use crate::middleware::EndpointMetrics;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    metrics: Vec<EndpointMetrics>,
    slow_endpoints: Vec<EndpointMetrics>,
    timestamp: DateTime<Utc>,
}

pub async fn report(State(state): State<AppState>) -> Json<PerformanceReport> {
    Json(PerformanceReport {
        metrics: state.perf.report(),
        slow_endpoints: state.perf.slow_endpoints(state.slow_threshold),
        timestamp: Utc::now(),
    })
}

pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.perf.reset();
    StatusCode::NO_CONTENT
}
