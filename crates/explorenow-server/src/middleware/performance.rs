//! Per-endpoint response time metrics
//!
//! Aggregates are keyed by `METHOD:path` and only cover `/api/` routes.
//! Recording never changes the response.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default average above which an endpoint is reported as slow
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(200);

/// Aggregate timings for one endpoint, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMetrics {
    pub endpoint: String,
    pub method: String,
    pub count: u64,
    pub total_time: f64,
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
    pub last_updated: DateTime<Utc>,
}

impl EndpointMetrics {
    fn new(method: &str, endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            count: 0,
            total_time: 0.0,
            avg_time: 0.0,
            min_time: f64::INFINITY,
            max_time: 0.0,
            last_updated: Utc::now(),
        }
    }

    fn add(&mut self, millis: f64) {
        self.count += 1;
        self.total_time += millis;
        self.avg_time = self.total_time / self.count as f64;
        self.min_time = self.min_time.min(millis);
        self.max_time = self.max_time.max(millis);
        self.last_updated = Utc::now();
    }
}

#[derive(Default)]
pub struct PerformanceMonitor {
    metrics: DashMap<String, EndpointMetrics>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, method: &str, path: &str, elapsed: Duration) {
        let millis = elapsed.as_secs_f64() * 1000.0;
        self.metrics
            .entry(format!("{}:{}", method, path))
            .or_insert_with(|| EndpointMetrics::new(method, path))
            .add(millis);
    }

    /// All endpoints, slowest average first
    pub fn report(&self) -> Vec<EndpointMetrics> {
        let mut report: Vec<EndpointMetrics> =
            self.metrics.iter().map(|entry| entry.value().clone()).collect();
        report.sort_by(|a, b| b.avg_time.total_cmp(&a.avg_time));
        report
    }

    /// Endpoints whose average exceeds `threshold`
    pub fn slow_endpoints(&self, threshold: Duration) -> Vec<EndpointMetrics> {
        let limit = threshold.as_secs_f64() * 1000.0;
        self.report()
            .into_iter()
            .filter(|m| m.avg_time > limit)
            .collect()
    }

    pub fn reset(&self) {
        self.metrics.clear();
    }
}

/// Records its sample when dropped, so aborted requests are counted too.
struct Sample {
    monitor: Arc<PerformanceMonitor>,
    method: String,
    path: String,
    started: Instant,
}

impl Drop for Sample {
    fn drop(&mut self) {
        self.monitor
            .record(&self.method, &self.path, self.started.elapsed());
    }
}

pub async fn track(
    State(monitor): State<Arc<PerformanceMonitor>>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with("/api/") {
        return next.run(request).await;
    }

    let _sample = Sample {
        monitor,
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        started: Instant::now(),
    };
    next.run(request).await
}
