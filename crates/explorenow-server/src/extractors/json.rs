//! JSON body extractor that also validates the draft

use crate::error::ApiError;
use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use explorenow_core::Validate;
use serde::de::DeserializeOwned;

/// Like `Json<T>`, but rejections are 400s and `T::validate` must pass.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}
