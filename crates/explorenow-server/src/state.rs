//! Application state shared across handlers

use crate::middleware::performance::{PerformanceMonitor, DEFAULT_SLOW_THRESHOLD};
use crate::services::AuthService;
use crate::storage::cache::{TtlCache, DEFAULT_TTL};
use bytes::Bytes;
use explorenow_core::Storage;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    /// Serialized JSON bodies keyed by route-derived strings
    pub cache: Arc<TtlCache<Bytes>>,
    pub perf: Arc<PerformanceMonitor>,
    pub auth: Arc<AuthService>,
    /// Which backend answers storage calls ("postgres" or "memory")
    pub backend: &'static str,
    pub cache_ttl: Duration,
    pub slow_threshold: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>, backend: &'static str) -> Self {
        Self {
            auth: Arc::new(AuthService::new(store.clone())),
            store,
            cache: Arc::new(TtlCache::new()),
            perf: Arc::new(PerformanceMonitor::new()),
            backend,
            cache_ttl: DEFAULT_TTL,
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }
}
