//! Storage traits for persistence
//!
//! Each entity family gets its own store trait; `Storage` bundles all six so
//! handlers can hold a single `Arc<dyn Storage>` without knowing which backend
//! answers.

use crate::Result;
use async_trait::async_trait;
use explorenow_types::{
    Booking, BookingStatus, CatalogFilter, Hotel, HotelPatch, Id, NewBooking, NewHotel, NewReview,
    NewTravelDocument, NewTripPackage, NewUser, Review, ReviewFilter, TravelDocument, TripPackage,
    TripPackagePatch, User, UserPatch,
};

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: Id) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn update_user(&self, id: Id, patch: UserPatch) -> Result<Option<User>>;
}

/// Hotel store
#[async_trait]
pub trait HotelStore: Send + Sync {
    async fn list_hotels(&self, filter: CatalogFilter) -> Result<Vec<Hotel>>;
    async fn get_hotel(&self, id: Id) -> Result<Option<Hotel>>;
    async fn create_hotel(&self, hotel: NewHotel) -> Result<Hotel>;
    async fn update_hotel(&self, id: Id, patch: HotelPatch) -> Result<Option<Hotel>>;
}

/// Trip package store
#[async_trait]
pub trait TripPackageStore: Send + Sync {
    async fn list_trip_packages(&self, filter: CatalogFilter) -> Result<Vec<TripPackage>>;
    async fn get_trip_package(&self, id: Id) -> Result<Option<TripPackage>>;
    async fn create_trip_package(&self, package: NewTripPackage) -> Result<TripPackage>;
    async fn update_trip_package(
        &self,
        id: Id,
        patch: TripPackagePatch,
    ) -> Result<Option<TripPackage>>;
}

/// Booking store
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list_bookings(&self, user_id: Id) -> Result<Vec<Booking>>;
    async fn get_booking(&self, id: Id) -> Result<Option<Booking>>;
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking>;
    async fn update_booking_status(&self, id: Id, status: BookingStatus)
        -> Result<Option<Booking>>;
}

/// Review store
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn list_reviews(&self, filter: ReviewFilter) -> Result<Vec<Review>>;
    async fn get_review(&self, id: Id) -> Result<Option<Review>>;
    async fn create_review(&self, review: NewReview) -> Result<Review>;
    async fn mark_review_helpful(&self, id: Id) -> Result<Option<Review>>;
}

/// Travel document store
#[async_trait]
pub trait TravelDocumentStore: Send + Sync {
    async fn list_travel_documents(&self, user_id: Id) -> Result<Vec<TravelDocument>>;
    async fn get_travel_document(&self, id: Id) -> Result<Option<TravelDocument>>;
    async fn create_travel_document(&self, document: NewTravelDocument)
        -> Result<TravelDocument>;
    /// Removes the document only when `owner_id` matches; `false` otherwise.
    async fn delete_travel_document(&self, id: Id, owner_id: Id) -> Result<bool>;
}

/// The full storage surface
pub trait Storage:
    UserStore + HotelStore + TripPackageStore + BookingStore + ReviewStore + TravelDocumentStore
{
}

impl<T> Storage for T where
    T: UserStore + HotelStore + TripPackageStore + BookingStore + ReviewStore + TravelDocumentStore
{
}
