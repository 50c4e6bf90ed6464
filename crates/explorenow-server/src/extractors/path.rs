//! Numeric path identity

use crate::error::ApiError;
use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use explorenow_core::Id;

/// The single `:id`-style segment of a route, parsed as an integer.
pub struct PathId(pub Id);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        raw.parse()
            .map(PathId)
            .map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
    }
}
