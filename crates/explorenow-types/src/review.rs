//! Review types

use crate::validate::{Validate, ValidationError};
use crate::{Id, Target};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Id,
    pub user_id: Id,
    #[serde(flatten)]
    pub target: Target,
    /// 1-5 stars
    pub rating: i32,
    pub review_text: Option<String>,
    pub date_stayed: Option<DateTime<Utc>>,
    pub helpful: i32,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review submission. `helpful` and `verified` are not accepted from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub user_id: Id,
    #[serde(flatten)]
    pub target: Target,
    pub rating: i32,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub date_stayed: Option<DateTime<Utc>>,
}

impl Validate for NewReview {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::new("rating", "must be between 1 and 5"));
        }
        Ok(())
    }
}

/// Review listing filter; hotel and trip package filters never combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewFilter {
    #[default]
    All,
    Hotel(Id),
    TripPackage(Id),
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Hotel(id) => review.target == Target::Hotel(*id),
            ReviewFilter::TripPackage(id) => review.target == Target::TripPackage(*id),
        }
    }
}

impl Review {
    /// New reviews start unverified with no helpful votes.
    pub fn from_new(id: Id, new: NewReview, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            target: new.target,
            rating: new.rating,
            review_text: new.review_text,
            date_stayed: new.date_stayed,
            helpful: 0,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}
