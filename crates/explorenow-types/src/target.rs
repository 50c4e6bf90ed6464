//! Booking / review target
//!
//! A booking or review points at exactly one hotel or one trip package. The
//! wire format keeps the two nullable `hotelId` / `tripPackageId` fields, but
//! in Rust the pair is a single variant so "both" and "neither" cannot exist.

use crate::Id;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What a booking or review is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Hotel(Id),
    TripPackage(Id),
}

impl Target {
    /// Build a target from the two nullable wire fields.
    pub fn from_parts(hotel_id: Option<Id>, trip_package_id: Option<Id>) -> Result<Self, String> {
        match (hotel_id, trip_package_id) {
            (Some(id), None) => Ok(Target::Hotel(id)),
            (None, Some(id)) => Ok(Target::TripPackage(id)),
            (Some(_), Some(_)) => {
                Err("hotelId and tripPackageId are mutually exclusive".to_string())
            }
            (None, None) => Err("one of hotelId or tripPackageId is required".to_string()),
        }
    }

    pub fn hotel_id(&self) -> Option<Id> {
        match self {
            Target::Hotel(id) => Some(*id),
            Target::TripPackage(_) => None,
        }
    }

    pub fn trip_package_id(&self) -> Option<Id> {
        match self {
            Target::TripPackage(id) => Some(*id),
            Target::Hotel(_) => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Hotel(id) => write!(f, "hotel {}", id),
            Target::TripPackage(id) => write!(f, "trip package {}", id),
        }
    }
}

// Serialized as a two-entry map so it can be `#[serde(flatten)]`ed into records.
impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("hotelId", &self.hotel_id())?;
        map.serialize_entry("tripPackageId", &self.trip_package_id())?;
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetFields {
    #[serde(default)]
    hotel_id: Option<Id>,
    #[serde(default)]
    trip_package_id: Option<Id>,
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = TargetFields::deserialize(deserializer)?;
        Target::from_parts(fields.hotel_id, fields.trip_package_id).map_err(D::Error::custom)
    }
}
