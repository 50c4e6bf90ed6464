//! HTTP middleware

pub mod cache_control;
pub mod performance;

pub use cache_control::CachePolicy;
pub use performance::{EndpointMetrics, PerformanceMonitor};
