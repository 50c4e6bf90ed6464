//! Booking handlers

use crate::error::ApiError;
use crate::extractors::{PathId, ValidJson};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use explorenow_core::{Booking, BookingStatusUpdate, NewBooking};
use tracing::info;

pub async fn list_for_user(
    State(state): State<AppState>,
    PathId(user_id): PathId,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = state
        .store
        .list_bookings(user_id)
        .await
        .map_err(ApiError::storage("fetch bookings"))?;
    Ok(Json(bookings))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<NewBooking>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state
        .store
        .create_booking(draft)
        .await
        .map_err(ApiError::storage("create booking"))?;
    info!(
        "Booking {} created for user {} on {}",
        booking.id, booking.user_id, booking.target
    );
    Ok(Json(booking))
}

pub async fn update_status(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(update): ValidJson<BookingStatusUpdate>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state
        .store
        .update_booking_status(id, update.status)
        .await
        .map_err(ApiError::storage("update booking status"))?
        .ok_or(ApiError::NotFound("Booking"))?;
    info!("Booking {} is now {}", booking.id, booking.status);
    Ok(Json(booking))
}
