//! Authentication handlers

use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::services::LoginIdentifier;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use explorenow_core::{Id, RegisterRequest, UserType, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    username: Option<String>,
    password: String,
}

impl LoginRequest {
    /// Email wins when both are given.
    fn identifier(&self) -> Option<LoginIdentifier> {
        let present = |v: &Option<String>| v.as_ref().filter(|s| !s.is_empty()).cloned();
        present(&self.email)
            .map(LoginIdentifier::Email)
            .or_else(|| present(&self.username).map(LoginIdentifier::Username))
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.identifier().is_none() {
            return Err(ValidationError::new("email", "email or username is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    id: Id,
    username: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_type: Option<UserType>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    success: bool,
    user: UserSummary,
}

pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    info!("Registration attempt for: {}", req.username);
    let user = state.auth.register(req).await?;

    Ok(Json(AuthResponse {
        success: true,
        user: UserSummary {
            id: user.id,
            username: user.username,
            email: user.email,
            user_type: None,
        },
    }))
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let identifier = req
        .identifier()
        .ok_or_else(|| ApiError::Validation("email or username is required".into()))?;
    let user = state.auth.login(&identifier, &req.password).await?;
    info!("Login successful for user {}", user.id);

    Ok(Json(AuthResponse {
        success: true,
        user: UserSummary {
            id: user.id,
            username: user.username,
            email: user.email,
            user_type: Some(user.user_type),
        },
    }))
}
