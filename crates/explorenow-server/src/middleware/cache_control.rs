//! Cache-Control policies applied per route

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use tower_http::set_header::SetResponseHeaderLayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Auth and mutations
    NoStore,
    /// Per-user reads, 5 minutes
    Short,
    /// Shared lookups, 1 hour
    Medium,
    /// Fingerprinted static assets
    Long,
}

impl CachePolicy {
    pub fn header_value(self) -> &'static str {
        match self {
            CachePolicy::NoStore => "no-store, no-cache, must-revalidate",
            CachePolicy::Short => "private, max-age=300",
            CachePolicy::Medium => "public, max-age=3600",
            CachePolicy::Long => "public, max-age=31536000, immutable",
        }
    }

    /// Layer that sets `Cache-Control`, replacing any value set by the handler.
    pub fn layer(self) -> SetResponseHeaderLayer<HeaderValue> {
        SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(self.header_value()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_layer_overrides_handler_header() {
        let app = Router::new().route(
            "/",
            get(|| async { ([(CACHE_CONTROL, "public")], "ok") })
                .layer(CachePolicy::NoStore.layer()),
        );

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "no-store, no-cache, must-revalidate"
        );
    }

    #[test]
    fn test_policies_are_distinct() {
        let values = [
            CachePolicy::NoStore,
            CachePolicy::Short,
            CachePolicy::Medium,
            CachePolicy::Long,
        ]
        .map(CachePolicy::header_value);
        assert!(values[1].starts_with("private"));
        assert!(values[3].ends_with("immutable"));
        for (i, a) in values.iter().enumerate() {
            assert!(values[i + 1..].iter().all(|b| a != b));
        }
    }
}
