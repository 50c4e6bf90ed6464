//! Catalog listings: hotels and trip packages

use crate::validate::{listing_rating, non_empty, non_negative, optional, Validate, ValidationError};
use crate::{Id, ParseStatusError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a hotel or trip package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Active => write!(f, "active"),
            ListingStatus::Inactive => write!(f, "inactive"),
            ListingStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ListingStatus::Active),
            "inactive" => Ok(ListingStatus::Inactive),
            "maintenance" => Ok(ListingStatus::Maintenance),
            other => Err(ParseStatusError {
                kind: "listing status",
                value: other.to_string(),
            }),
        }
    }
}

/// Which listings a catalog read returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    #[default]
    ActiveOnly,
    All,
}

impl CatalogFilter {
    pub fn admits(&self, status: ListingStatus) -> bool {
        match self {
            CatalogFilter::ActiveOnly => status == ListingStatus::Active,
            CatalogFilter::All => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub address: Option<String>,
    pub price_per_night: f64,
    pub rating: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHotel {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    #[serde(default)]
    pub address: Option<String>,
    pub price_per_night: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: ListingStatus,
}

impl Validate for NewHotel {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("name", &self.name)?;
        non_empty("location", &self.location)?;
        non_negative("pricePerNight", self.price_per_night)?;
        listing_rating(self.rating)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub price_per_night: Option<f64>,
    pub rating: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
}

impl Validate for HotelPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        optional(&self.name, |v| non_empty("name", v))?;
        optional(&self.location, |v| non_empty("location", v))?;
        optional(&self.price_per_night, |v| non_negative("pricePerNight", *v))?;
        optional(&self.rating, |v| listing_rating(*v))
    }
}

impl Hotel {
    pub fn from_new(id: Id, new: NewHotel, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            location: new.location,
            address: new.address,
            price_per_night: new.price_per_night,
            rating: new.rating,
            amenities: new.amenities,
            images: new.images,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: HotelPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(price) = patch.price_per_night {
            self.price_per_night = price;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(amenities) = patch.amenities {
            self.amenities = amenities;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPackage {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    /// Free text, e.g. "6 days / 5 nights"
    pub duration: String,
    pub price: f64,
    pub rating: f64,
    pub category: Vec<String>,
    pub inclusions: Vec<String>,
    pub images: Vec<String>,
    pub status: ListingStatus,
    pub is_recommended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTripPackage {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    pub duration: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub is_recommended: bool,
}

impl Validate for NewTripPackage {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("name", &self.name)?;
        non_empty("location", &self.location)?;
        non_empty("duration", &self.duration)?;
        non_negative("price", self.price)?;
        listing_rating(self.rating)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPackagePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub category: Option<Vec<String>>,
    pub inclusions: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
    pub is_recommended: Option<bool>,
}

impl Validate for TripPackagePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        optional(&self.name, |v| non_empty("name", v))?;
        optional(&self.location, |v| non_empty("location", v))?;
        optional(&self.duration, |v| non_empty("duration", v))?;
        optional(&self.price, |v| non_negative("price", *v))?;
        optional(&self.rating, |v| listing_rating(*v))
    }
}

impl TripPackage {
    pub fn from_new(id: Id, new: NewTripPackage, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            location: new.location,
            duration: new.duration,
            price: new.price,
            rating: new.rating,
            category: new.category,
            inclusions: new.inclusions,
            images: new.images,
            status: new.status,
            is_recommended: new.is_recommended,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: TripPackagePatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(inclusions) = patch.inclusions {
            self.inclusions = inclusions;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(is_recommended) = patch.is_recommended {
            self.is_recommended = is_recommended;
        }
        self.updated_at = now;
    }
}
