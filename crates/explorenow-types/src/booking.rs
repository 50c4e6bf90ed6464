//! Booking types

use crate::validate::{non_negative, Validate, ValidationError};
use crate::{Id, ParseStatusError, Target};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(ParseStatusError {
                kind: "booking status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Id,
    pub user_id: Id,
    #[serde(flatten)]
    pub target: Target,
    /// Absent for trip package bookings
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub guests: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub user_id: Id,
    #[serde(flatten)]
    pub target: Target,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default = "default_guests")]
    pub guests: i32,
    pub total_price: f64,
    #[serde(default)]
    pub status: BookingStatus,
}

fn default_guests() -> i32 {
    1
}

impl Validate for NewBooking {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.guests < 1 {
            return Err(ValidationError::new("guests", "must be at least 1"));
        }
        non_negative("totalPrice", self.total_price)?;
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out < check_in {
                return Err(ValidationError::new(
                    "checkOut",
                    "must not be before checkIn",
                ));
            }
        }
        Ok(())
    }
}

/// Body of `PUT /api/bookings/:id/status`
#[derive(Debug, Clone, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

impl Validate for BookingStatusUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Booking {
    pub fn from_new(id: Id, new: NewBooking, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            target: new.target,
            check_in: new.check_in,
            check_out: new.check_out,
            guests: new.guests,
            total_price: new.total_price,
            status: new.status,
            booking_date: now,
            created_at: now,
            updated_at: now,
        }
    }
}
