//! Review handlers

use crate::error::ApiError;
use crate::extractors::{PathId, ValidJson};
use crate::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use explorenow_core::{Id, NewReview, Review, ReviewFilter};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    hotel_id: Option<Id>,
    trip_package_id: Option<Id>,
}

impl TryFrom<ReviewQuery> for ReviewFilter {
    type Error = ApiError;

    fn try_from(q: ReviewQuery) -> Result<Self, Self::Error> {
        match (q.hotel_id, q.trip_package_id) {
            (None, None) => Ok(ReviewFilter::All),
            (Some(id), None) => Ok(ReviewFilter::Hotel(id)),
            (None, Some(id)) => Ok(ReviewFilter::TripPackage(id)),
            (Some(_), Some(_)) => Err(ApiError::BadRequest(
                "hotelId and tripPackageId cannot be combined".into(),
            )),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ReviewQuery>, QueryRejection>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filter = ReviewFilter::try_from(query)?;
    let reviews = state
        .store
        .list_reviews(filter)
        .await
        .map_err(ApiError::storage("fetch reviews"))?;
    Ok(Json(reviews))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<NewReview>,
) -> Result<Json<Review>, ApiError> {
    let review = state
        .store
        .create_review(draft)
        .await
        .map_err(ApiError::storage("create review"))?;
    Ok(Json(review))
}

pub async fn mark_helpful(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Review>, ApiError> {
    state
        .store
        .mark_review_helpful(id)
        .await
        .map_err(ApiError::storage("update review"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Review"))
}
