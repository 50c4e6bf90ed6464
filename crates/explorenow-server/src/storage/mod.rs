//! Storage layer
//!
//! PostgreSQL when a database is reachable at startup, otherwise an in-memory
//! store seeded with the sample catalog. DashMap also backs the response cache.

pub mod cache;
pub mod db;
pub mod fixtures;
pub mod memory;

pub use cache::TtlCache;
pub use db::{PgStore, PoolSettings};
pub use fixtures::Fixtures;
pub use memory::MemoryStore;

use async_trait::async_trait;
use explorenow_core::ports::{
    BookingStore, HotelStore, ReviewStore, TravelDocumentStore, TripPackageStore, UserStore,
};
use explorenow_core::{
    Booking, BookingStatus, CatalogFilter, Hotel, HotelPatch, Id, NewBooking, NewHotel, NewReview,
    NewTravelDocument, NewTripPackage, NewUser, Result, Review, ReviewFilter, TravelDocument,
    TripPackage, TripPackagePatch, User, UserPatch,
};
use tracing::{info, warn};

/// The backend chosen at startup; fixed for the life of the process.
pub enum Backend {
    Relational(PgStore),
    InMemory(MemoryStore),
}

impl Backend {
    pub fn kind(&self) -> &'static str {
        match self {
            Backend::Relational(_) => "postgres",
            Backend::InMemory(_) => "memory",
        }
    }
}

/// Pick the backend once, before the router is built.
///
/// A relational backend is used only if it connects, migrates and answers a
/// catalog read; any failure falls back to the seeded in-memory store.
pub async fn select_backend(
    database_url: Option<&str>,
    settings: &PoolSettings,
) -> Result<Backend> {
    let Some(url) = database_url.filter(|url| !url.trim().is_empty()) else {
        warn!("DATABASE_URL not set, using in-memory storage with sample data");
        return in_memory();
    };

    let store = match PgStore::connect(url, settings).await {
        Ok(store) => store,
        Err(e) => {
            warn!("Database unavailable ({:#}), using in-memory storage", e);
            return in_memory();
        }
    };

    match store.list_hotels(CatalogFilter::ActiveOnly).await {
        Ok(hotels) => {
            info!("Using PostgreSQL storage ({} active hotels)", hotels.len());
            Ok(Backend::Relational(store))
        }
        Err(e) => {
            warn!("Database probe failed ({}), using in-memory storage", e);
            store.close().await;
            in_memory()
        }
    }
}

fn in_memory() -> Result<Backend> {
    let store = MemoryStore::with_fixtures()?;
    info!("Using in-memory storage");
    Ok(Backend::InMemory(store))
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            Backend::Relational($store) => $call,
            Backend::InMemory($store) => $call,
        }
    };
}

#[async_trait]
impl UserStore for Backend {
    async fn get_user(&self, id: Id) -> Result<Option<User>> {
        dispatch!(self, s => s.get_user(id).await)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        dispatch!(self, s => s.get_user_by_username(username).await)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        dispatch!(self, s => s.get_user_by_email(email).await)
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        dispatch!(self, s => s.create_user(user).await)
    }

    async fn update_user(&self, id: Id, patch: UserPatch) -> Result<Option<User>> {
        dispatch!(self, s => s.update_user(id, patch).await)
    }
}

#[async_trait]
impl HotelStore for Backend {
    async fn list_hotels(&self, filter: CatalogFilter) -> Result<Vec<Hotel>> {
        dispatch!(self, s => s.list_hotels(filter).await)
    }

    async fn get_hotel(&self, id: Id) -> Result<Option<Hotel>> {
        dispatch!(self, s => s.get_hotel(id).await)
    }

    async fn create_hotel(&self, hotel: NewHotel) -> Result<Hotel> {
        dispatch!(self, s => s.create_hotel(hotel).await)
    }

    async fn update_hotel(&self, id: Id, patch: HotelPatch) -> Result<Option<Hotel>> {
        dispatch!(self, s => s.update_hotel(id, patch).await)
    }
}

#[async_trait]
impl TripPackageStore for Backend {
    async fn list_trip_packages(&self, filter: CatalogFilter) -> Result<Vec<TripPackage>> {
        dispatch!(self, s => s.list_trip_packages(filter).await)
    }

    async fn get_trip_package(&self, id: Id) -> Result<Option<TripPackage>> {
        dispatch!(self, s => s.get_trip_package(id).await)
    }

    async fn create_trip_package(&self, package: NewTripPackage) -> Result<TripPackage> {
        dispatch!(self, s => s.create_trip_package(package).await)
    }

    async fn update_trip_package(
        &self,
        id: Id,
        patch: TripPackagePatch,
    ) -> Result<Option<TripPackage>> {
        dispatch!(self, s => s.update_trip_package(id, patch).await)
    }
}

#[async_trait]
impl BookingStore for Backend {
    async fn list_bookings(&self, user_id: Id) -> Result<Vec<Booking>> {
        dispatch!(self, s => s.list_bookings(user_id).await)
    }

    async fn get_booking(&self, id: Id) -> Result<Option<Booking>> {
        dispatch!(self, s => s.get_booking(id).await)
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        dispatch!(self, s => s.create_booking(booking).await)
    }

    async fn update_booking_status(
        &self,
        id: Id,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        dispatch!(self, s => s.update_booking_status(id, status).await)
    }
}

#[async_trait]
impl ReviewStore for Backend {
    async fn list_reviews(&self, filter: ReviewFilter) -> Result<Vec<Review>> {
        dispatch!(self, s => s.list_reviews(filter).await)
    }

    async fn get_review(&self, id: Id) -> Result<Option<Review>> {
        dispatch!(self, s => s.get_review(id).await)
    }

    async fn create_review(&self, review: NewReview) -> Result<Review> {
        dispatch!(self, s => s.create_review(review).await)
    }

    async fn mark_review_helpful(&self, id: Id) -> Result<Option<Review>> {
        dispatch!(self, s => s.mark_review_helpful(id).await)
    }
}

#[async_trait]
impl TravelDocumentStore for Backend {
    async fn list_travel_documents(&self, user_id: Id) -> Result<Vec<TravelDocument>> {
        dispatch!(self, s => s.list_travel_documents(user_id).await)
    }

    async fn get_travel_document(&self, id: Id) -> Result<Option<TravelDocument>> {
        dispatch!(self, s => s.get_travel_document(id).await)
    }

    async fn create_travel_document(&self, document: NewTravelDocument) -> Result<TravelDocument> {
        dispatch!(self, s => s.create_travel_document(document).await)
    }

    async fn delete_travel_document(&self, id: Id, owner_id: Id) -> Result<bool> {
        dispatch!(self, s => s.delete_travel_document(id, owner_id).await)
    }
}
