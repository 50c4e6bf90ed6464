//! User profile handlers

use crate::error::ApiError;
use crate::extractors::{PathId, ValidJson};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use explorenow_core::{User, UserPatch};

pub async fn get(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<User>, ApiError> {
    state
        .store
        .get_user(id)
        .await
        .map_err(ApiError::storage("fetch user"))?
        .map(Json)
        .ok_or(ApiError::NotFound("User"))
}

pub async fn update(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(patch): ValidJson<UserPatch>,
) -> Result<Json<User>, ApiError> {
    state
        .store
        .update_user(id, patch)
        .await
        .map_err(ApiError::storage("update user"))?
        .map(Json)
        .ok_or(ApiError::NotFound("User"))
}
