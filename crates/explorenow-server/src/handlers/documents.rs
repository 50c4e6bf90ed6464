//! Travel document handlers

use crate::error::ApiError;
use crate::extractors::{PathId, ValidJson};
use crate::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use explorenow_core::{Id, NewTravelDocument, TravelDocument};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    user_id: Id,
}

pub async fn list_for_user(
    State(state): State<AppState>,
    PathId(user_id): PathId,
) -> Result<Json<Vec<TravelDocument>>, ApiError> {
    let documents = state
        .store
        .list_travel_documents(user_id)
        .await
        .map_err(ApiError::storage("fetch travel documents"))?;
    Ok(Json(documents))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<NewTravelDocument>,
) -> Result<Json<TravelDocument>, ApiError> {
    let document = state
        .store
        .create_travel_document(draft)
        .await
        .map_err(ApiError::storage("create travel document"))?;
    Ok(Json(document))
}

/// Only the owner may delete; anyone else sees the document as missing.
pub async fn delete(
    State(state): State<AppState>,
    PathId(id): PathId,
    owner: Result<Query<OwnerQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let Query(owner) = owner.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let deleted = state
        .store
        .delete_travel_document(id, owner.user_id)
        .await
        .map_err(ApiError::storage("delete travel document"))?;

    if deleted {
        info!("Travel document {} deleted by user {}", id, owner.user_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Travel document"))
    }
}
