//! Trip package catalog handlers
//!
//! Reads go through the TTL cache; writes refresh the item entry and drop the
//! list entry.

use super::{json_response, to_json_bytes};
use crate::error::ApiError;
use crate::extractors::{PathId, ValidJson};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Response;
use explorenow_core::{CatalogFilter, Id, NewTripPackage, TripPackage, TripPackagePatch};
use serde::Deserialize;
use tracing::debug;

pub const LIST_KEY: &str = "trips:packages:all";

pub fn item_key(id: Id) -> String {
    format!("trip:package:{}", id)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    include_inactive: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    // The full catalog is an operator view and is never cached.
    if query.include_inactive {
        let packages = state
            .store
            .list_trip_packages(CatalogFilter::All)
            .await
            .map_err(ApiError::storage("fetch trip packages"))?;
        return Ok(json_response(to_json_bytes(&packages)?));
    }

    if let Some(body) = state.cache.get(LIST_KEY) {
        debug!("Cache hit: {}", LIST_KEY);
        return Ok(json_response(body));
    }

    let generation = state.cache.generation();
    let packages = state
        .store
        .list_trip_packages(CatalogFilter::ActiveOnly)
        .await
        .map_err(ApiError::storage("fetch trip packages"))?;
    let body = to_json_bytes(&packages)?;
    state
        .cache
        .set_if_unchanged(LIST_KEY, body.clone(), state.cache_ttl, generation);
    Ok(json_response(body))
}

pub async fn get(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Response, ApiError> {
    let key = item_key(id);
    if let Some(body) = state.cache.get(&key) {
        debug!("Cache hit: {}", key);
        return Ok(json_response(body));
    }

    let generation = state.cache.generation();
    let package = state
        .store
        .get_trip_package(id)
        .await
        .map_err(ApiError::storage("fetch trip package"))?
        .ok_or(ApiError::NotFound("Trip package"))?;
    let body = to_json_bytes(&package)?;
    state
        .cache
        .set_if_unchanged(key, body.clone(), state.cache_ttl, generation);
    Ok(json_response(body))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<NewTripPackage>,
) -> Result<Response, ApiError> {
    let package = state
        .store
        .create_trip_package(draft)
        .await
        .map_err(ApiError::storage("create trip package"))?;
    write_through(&state, &package)
}

pub async fn update(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(patch): ValidJson<TripPackagePatch>,
) -> Result<Response, ApiError> {
    let package = state
        .store
        .update_trip_package(id, patch)
        .await
        .map_err(ApiError::storage("update trip package"))?
        .ok_or(ApiError::NotFound("Trip package"))?;
    write_through(&state, &package)
}

fn write_through(state: &AppState, package: &TripPackage) -> Result<Response, ApiError> {
    let body = to_json_bytes(package)?;
    // Invalidate first so in-flight reads cannot refill stale bodies.
    state.cache.remove(LIST_KEY);
    state.cache.set(item_key(package.id), body.clone(), state.cache_ttl);
    Ok(json_response(body))
}
