//! HTTP error responses
//!
//! Every failure leaves as `{"error": summary}`; validation failures add a
//! `details` field. Backend failures are logged, never echoed.

use crate::services::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use explorenow_core::{StoreError, ValidationError};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or rule-breaking body
    Validation(String),
    /// Well-formed request the API cannot act on
    BadRequest(String),
    NotFound(&'static str),
    Unauthorized(&'static str),
    /// A storage call failed while performing `action`
    Storage {
        action: &'static str,
        source: StoreError,
    },
    Internal(String),
}

impl ApiError {
    pub fn storage(action: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Storage { action, source }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage { source, .. } if source.is_client_error() => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Storage { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials"),
            AuthError::Store(source) => ApiError::Storage {
                action: "authenticate",
                source,
            },
            AuthError::Hashing(message) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(details) => json!({
                "error": "Invalid request data",
                "details": details,
            }),
            ApiError::BadRequest(message) => json!({ "error": message }),
            ApiError::NotFound(what) => json!({ "error": format!("{} not found", what) }),
            ApiError::Unauthorized(message) => json!({ "error": message }),
            ApiError::Storage { source, .. } if source.is_client_error() => {
                json!({ "error": source.to_string() })
            }
            ApiError::Storage { action, source } => {
                error!("Failed to {}: {}", action, source);
                json!({ "error": format!("Failed to {}", action) })
            }
            ApiError::Internal(message) => {
                error!("Internal error: {}", message);
                json!({ "error": "Internal server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}
