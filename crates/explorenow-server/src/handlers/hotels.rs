//! Hotel catalog handlers
//!
//! Reads go through the TTL cache; writes refresh the item entry and drop the
//! list entry.

use super::{json_response, to_json_bytes};
use crate::error::ApiError;
use crate::extractors::{PathId, ValidJson};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Response;
use explorenow_core::{CatalogFilter, Hotel, HotelPatch, Id, NewHotel};
use serde::Deserialize;
use tracing::debug;

pub const LIST_KEY: &str = "hotels:all";

pub fn item_key(id: Id) -> String {
    format!("hotel:{}", id)
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
        let hotels = state
            .store
            .list_hotels(CatalogFilter::All)
            .await
            .map_err(ApiError::storage("fetch hotels"))?;
        return Ok(json_response(to_json_bytes(&hotels)?));
    }

    if let Some(body) = state.cache.get(LIST_KEY) {
        debug!("Cache hit: {}", LIST_KEY);
        return Ok(json_response(body));
    }

    let generation = state.cache.generation();
    let hotels = state
        .store
        .list_hotels(CatalogFilter::ActiveOnly)
        .await
        .map_err(ApiError::storage("fetch hotels"))?;
    let body = to_json_bytes(&hotels)?;
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
    let hotel = state
        .store
        .get_hotel(id)
        .await
        .map_err(ApiError::storage("fetch hotel"))?
        .ok_or(ApiError::NotFound("Hotel"))?;
    let body = to_json_bytes(&hotel)?;
    state
        .cache
        .set_if_unchanged(key, body.clone(), state.cache_ttl, generation);
    Ok(json_response(body))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<NewHotel>,
) -> Result<Response, ApiError> {
    let hotel = state
        .store
        .create_hotel(draft)
        .await
        .map_err(ApiError::storage("create hotel"))?;
    write_through(&state, &hotel)
}

pub async fn update(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(patch): ValidJson<HotelPatch>,
) -> Result<Response, ApiError> {
    let hotel = state
        .store
        .update_hotel(id, patch)
        .await
        .map_err(ApiError::storage("update hotel"))?
        .ok_or(ApiError::NotFound("Hotel"))?;
    write_through(&state, &hotel)
}

fn write_through(state: &AppState, hotel: &Hotel) -> Result<Response, ApiError> {
    let body = to_json_bytes(hotel)?;
    // Invalidate first so in-flight reads cannot refill stale bodies.
    state.cache.remove(LIST_KEY);
    state.cache.set(item_key(hotel.id), body.clone(), state.cache_ttl);
    Ok(json_response(body))
}
