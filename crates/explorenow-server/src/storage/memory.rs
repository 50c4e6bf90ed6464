//! In-memory storage backend (DashMap per entity kind)
//!
//! Used when no database is reachable. Identities come from one atomic
//! counter shared by every kind, so they are never reused within a run.

use super::fixtures::{Fixtures, MAX_FIXTURE_ID};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use explorenow_core::ports::{
    BookingStore, HotelStore, ReviewStore, TravelDocumentStore, TripPackageStore, UserStore,
};
use explorenow_core::{
    Booking, BookingStatus, CatalogFilter, Hotel, HotelPatch, Id, NewBooking, NewHotel,
    NewReview, NewTravelDocument, NewTripPackage, NewUser, Result, Review, ReviewFilter,
    StoreError, Target, TravelDocument, TripPackage, TripPackagePatch, User, UserPatch,
};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

/// First identity handed out after the fixture set is loaded
const FIRST_FREE_ID: Id = 10;

pub struct MemoryStore {
    users: DashMap<Id, User>,
    hotels: DashMap<Id, Hotel>,
    trip_packages: DashMap<Id, TripPackage>,
    bookings: DashMap<Id, Booking>,
    reviews: DashMap<Id, Review>,
    travel_documents: DashMap<Id, TravelDocument>,
    next_id: AtomicI32,
    /// Serializes user writes so username / email uniqueness holds.
    user_writes: Mutex<()>,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self {
            users: DashMap::new(),
            hotels: DashMap::new(),
            trip_packages: DashMap::new(),
            bookings: DashMap::new(),
            reviews: DashMap::new(),
            travel_documents: DashMap::new(),
            next_id: AtomicI32::new(1),
            user_writes: Mutex::new(()),
        }
    }

    /// A store pre-populated with the sample catalog.
    pub fn with_fixtures() -> Result<Self> {
        let fixtures = Fixtures::load()?;
        let mut store = Self::empty();

        store.users.extend(fixtures.users.into_iter().map(|u| (u.id, u)));
        store.hotels.extend(fixtures.hotels.into_iter().map(|h| (h.id, h)));
        store
            .trip_packages
            .extend(fixtures.trip_packages.into_iter().map(|p| (p.id, p)));
        store
            .bookings
            .extend(fixtures.bookings.into_iter().map(|b| (b.id, b)));
        store
            .reviews
            .extend(fixtures.reviews.into_iter().map(|r| (r.id, r)));
        store
            .travel_documents
            .extend(fixtures.travel_documents.into_iter().map(|d| (d.id, d)));
        store
            .next_id
            .store(FIRST_FREE_ID.max(MAX_FIXTURE_ID + 1), Ordering::SeqCst);

        Ok(store)
    }

    fn allocate_id(&self) -> Id {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Counts per kind: users, hotels, packages, bookings, reviews, documents.
    pub fn counts(&self) -> [usize; 6] {
        [
            self.users.len(),
            self.hotels.len(),
            self.trip_packages.len(),
            self.bookings.len(),
            self.reviews.len(),
            self.travel_documents.len(),
        ]
    }

    fn ensure_user(&self, id: Id) -> Result<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::InvalidReference { kind: "user", id })
        }
    }

    fn ensure_target(&self, target: Target) -> Result<()> {
        let exists = match target {
            Target::Hotel(id) => self.hotels.contains_key(&id),
            Target::TripPackage(id) => self.trip_packages.contains_key(&id),
        };
        match (exists, target) {
            (true, _) => Ok(()),
            (false, Target::Hotel(id)) => Err(StoreError::InvalidReference { kind: "hotel", id }),
            (false, Target::TripPackage(id)) => Err(StoreError::InvalidReference {
                kind: "trip package",
                id,
            }),
        }
    }

    fn find_user(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }
}

/// Linear scan with a predicate, ordered by identity.
fn scan<T: Clone>(map: &DashMap<Id, T>, predicate: impl Fn(&T) -> bool) -> Vec<T> {
    let mut rows: Vec<(Id, T)> = map
        .iter()
        .filter(|entry| predicate(entry.value()))
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    rows.sort_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, row)| row).collect()
}

fn get<T: Clone>(map: &DashMap<Id, T>, id: Id) -> Option<T> {
    map.get(&id).map(|entry| entry.value().clone())
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: Id) -> Result<Option<User>> {
        Ok(get(&self.users, id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.find_user(|u| u.username == username))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find_user(|u| u.email == email))
    }

    async fn create_user(&self, new: NewUser) -> Result<User> {
        let _guard = self.user_writes.lock().unwrap_or_else(|e| e.into_inner());

        if self.find_user(|u| u.username == new.username).is_some() {
            return Err(StoreError::Conflict(format!(
                "username '{}' is taken",
                new.username
            )));
        }
        if self.find_user(|u| u.email == new.email).is_some() {
            return Err(StoreError::Conflict(format!(
                "email '{}' is already registered",
                new.email
            )));
        }

        let user = User::from_new(self.allocate_id(), new, Utc::now());
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Id, patch: UserPatch) -> Result<Option<User>> {
        let _guard = self.user_writes.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(email) = &patch.email {
            if self.find_user(|u| u.id != id && &u.email == email).is_some() {
                return Err(StoreError::Conflict(format!(
                    "email '{}' is already registered",
                    email
                )));
            }
        }

        Ok(self.users.get_mut(&id).map(|mut user| {
            user.apply(patch, Utc::now());
            user.clone()
        }))
    }
}

#[async_trait]
impl HotelStore for MemoryStore {
    async fn list_hotels(&self, filter: CatalogFilter) -> Result<Vec<Hotel>> {
        Ok(scan(&self.hotels, |h| filter.admits(h.status)))
    }

    async fn get_hotel(&self, id: Id) -> Result<Option<Hotel>> {
        Ok(get(&self.hotels, id))
    }

    async fn create_hotel(&self, new: NewHotel) -> Result<Hotel> {
        let hotel = Hotel::from_new(self.allocate_id(), new, Utc::now());
        self.hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn update_hotel(&self, id: Id, patch: HotelPatch) -> Result<Option<Hotel>> {
        Ok(self.hotels.get_mut(&id).map(|mut hotel| {
            hotel.apply(patch, Utc::now());
            hotel.clone()
        }))
    }
}

#[async_trait]
impl TripPackageStore for MemoryStore {
    async fn list_trip_packages(&self, filter: CatalogFilter) -> Result<Vec<TripPackage>> {
        Ok(scan(&self.trip_packages, |p| filter.admits(p.status)))
    }

    async fn get_trip_package(&self, id: Id) -> Result<Option<TripPackage>> {
        Ok(get(&self.trip_packages, id))
    }

    async fn create_trip_package(&self, new: NewTripPackage) -> Result<TripPackage> {
        let package = TripPackage::from_new(self.allocate_id(), new, Utc::now());
        self.trip_packages.insert(package.id, package.clone());
        Ok(package)
    }

    async fn update_trip_package(
        &self,
        id: Id,
        patch: TripPackagePatch,
    ) -> Result<Option<TripPackage>> {
        Ok(self.trip_packages.get_mut(&id).map(|mut package| {
            package.apply(patch, Utc::now());
            package.clone()
        }))
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_bookings(&self, user_id: Id) -> Result<Vec<Booking>> {
        Ok(scan(&self.bookings, |b| b.user_id == user_id))
    }

    async fn get_booking(&self, id: Id) -> Result<Option<Booking>> {
        Ok(get(&self.bookings, id))
    }

    async fn create_booking(&self, new: NewBooking) -> Result<Booking> {
        self.ensure_user(new.user_id)?;
        self.ensure_target(new.target)?;

        let booking = Booking::from_new(self.allocate_id(), new, Utc::now());
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_booking_status(
        &self,
        id: Id,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        Ok(self.bookings.get_mut(&id).map(|mut booking| {
            booking.status = status;
            booking.updated_at = Utc::now();
            booking.clone()
        }))
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn list_reviews(&self, filter: ReviewFilter) -> Result<Vec<Review>> {
        Ok(scan(&self.reviews, |r| filter.matches(r)))
    }

    async fn get_review(&self, id: Id) -> Result<Option<Review>> {
        Ok(get(&self.reviews, id))
    }

    async fn create_review(&self, new: NewReview) -> Result<Review> {
        self.ensure_user(new.user_id)?;
        self.ensure_target(new.target)?;

        let review = Review::from_new(self.allocate_id(), new, Utc::now());
        self.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn mark_review_helpful(&self, id: Id) -> Result<Option<Review>> {
        Ok(self.reviews.get_mut(&id).map(|mut review| {
            review.helpful = review.helpful.saturating_add(1);
            review.updated_at = Utc::now();
            review.clone()
        }))
    }
}

#[async_trait]
impl TravelDocumentStore for MemoryStore {
    async fn list_travel_documents(&self, user_id: Id) -> Result<Vec<TravelDocument>> {
        Ok(scan(&self.travel_documents, |d| d.user_id == user_id))
    }

    async fn get_travel_document(&self, id: Id) -> Result<Option<TravelDocument>> {
        Ok(get(&self.travel_documents, id))
    }

    async fn create_travel_document(&self, new: NewTravelDocument) -> Result<TravelDocument> {
        self.ensure_user(new.user_id)?;

        let document = TravelDocument::from_new(self.allocate_id(), new, Utc::now());
        self.travel_documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn delete_travel_document(&self, id: Id, owner_id: Id) -> Result<bool> {
        Ok(self
            .travel_documents
            .remove_if(&id, |_, doc| doc.user_id == owner_id)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorenow_core::{ListingStatus, UserType};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn store() -> MemoryStore {
        MemoryStore::with_fixtures().unwrap()
    }

    fn new_hotel(name: &str) -> NewHotel {
        NewHotel {
            name: name.into(),
            description: None,
            location: "Udaipur, Rajasthan".into(),
            address: None,
            price_per_night: 7000.0,
            rating: 4.2,
            amenities: vec!["Wi-Fi".into(), "Lake View".into()],
            images: vec![],
            status: ListingStatus::Active,
        }
    }

    fn new_booking(user_id: Id, target: Target) -> NewBooking {
        NewBooking {
            user_id,
            target,
            check_in: None,
            check_out: None,
            guests: 2,
            total_price: 14000.0,
            status: BookingStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_fixture_counts() {
        assert_eq!(store().counts(), [4, 5, 5, 4, 5, 3]);
    }

    #[tokio::test]
    async fn test_created_hotel_reads_back() {
        let store = store();
        let draft = new_hotel("Lake Palace");

        let created = store.create_hotel(draft.clone()).await.unwrap();
        assert_eq!(created.id, FIRST_FREE_ID);

        let fetched = store.get_hotel(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, draft.name);
        assert_eq!(fetched.amenities, draft.amenities);
    }

    #[tokio::test]
    async fn test_identity_counter_shared_across_kinds() {
        let store = store();
        let hotel = store.create_hotel(new_hotel("A")).await.unwrap();
        let booking = store
            .create_booking(new_booking(2, Target::Hotel(hotel.id)))
            .await
            .unwrap();
        assert_eq!(booking.id, hotel.id + 1);
    }

    #[tokio::test]
    async fn test_missing_records_are_absent_not_errors() {
        let store = store();
        assert!(store.get_hotel(999).await.unwrap().is_none());
        assert!(store
            .update_booking_status(999, BookingStatus::Confirmed)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .update_hotel(999, HotelPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_inactive_hotels_hidden_by_default() {
        let store = store();
        store
            .update_hotel(
                3,
                HotelPatch {
                    status: Some(ListingStatus::Maintenance),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let active = store.list_hotels(CatalogFilter::ActiveOnly).await.unwrap();
        assert_eq!(active.len(), 4);
        assert!(active.iter().all(|h| h.id != 3));
        assert_eq!(store.list_hotels(CatalogFilter::All).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp_only() {
        let store = store();
        let before = store.get_hotel(1).await.unwrap().unwrap();
        let after = store
            .update_hotel(
                1,
                HotelPatch {
                    price_per_night: Some(16000.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.price_per_night, 16000.0);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.name, before.name);
    }

    #[tokio::test]
    async fn test_review_filters_are_exclusive() {
        let store = store();

        let hotel_reviews = store.list_reviews(ReviewFilter::Hotel(1)).await.unwrap();
        assert_eq!(hotel_reviews.len(), 1);
        assert!(hotel_reviews
            .iter()
            .all(|r| r.target == Target::Hotel(1) && r.target.trip_package_id().is_none()));

        // Package 1 and hotel 1 share an identity but not reviews.
        let package_reviews = store
            .list_reviews(ReviewFilter::TripPackage(1))
            .await
            .unwrap();
        assert_eq!(package_reviews.len(), 1);
        assert!(package_reviews.iter().all(|r| r.target.hotel_id().is_none()));

        assert_eq!(store.list_reviews(ReviewFilter::All).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_new_review_counters_reset() {
        let store = store();
        let review = store
            .create_review(NewReview {
                user_id: 4,
                target: Target::TripPackage(5),
                rating: 5,
                review_text: Some("Breathtaking".into()),
                date_stayed: None,
            })
            .await
            .unwrap();
        assert_eq!(review.helpful, 0);
        assert!(!review.verified);

        let bumped = store.mark_review_helpful(review.id).await.unwrap().unwrap();
        assert_eq!(bumped.helpful, 1);
    }

    #[tokio::test]
    async fn test_helpful_counter_saturates() {
        let store = store();
        if let Some(mut review) = store.reviews.get_mut(&1) {
            review.helpful = i32::MAX;
        }

        let bumped = store.mark_review_helpful(1).await.unwrap().unwrap();
        assert_eq!(bumped.helpful, i32::MAX);
        assert!(store.mark_review_helpful(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dangling_references_rejected() {
        let store = store();

        let err = store
            .create_booking(new_booking(99, Target::Hotel(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference { kind: "user", id: 99 }));

        let err = store
            .create_booking(new_booking(2, Target::TripPackage(42)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidReference {
                kind: "trip package",
                id: 42
            }
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = store();
        let err = store
            .create_user(NewUser {
                username: "john_doe".into(),
                email: "someone-else@example.com".into(),
                password_hash: "x".into(),
                first_name: None,
                last_name: None,
                phone: None,
                user_type: UserType::User,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_document_requires_owner() {
        let store = store();

        // Document 1 belongs to user 2.
        assert!(!store.delete_travel_document(1, 3).await.unwrap());
        assert!(store.get_travel_document(1).await.unwrap().is_some());

        assert!(store.delete_travel_document(1, 2).await.unwrap());
        assert!(store.get_travel_document(1).await.unwrap().is_none());

        assert!(!store.delete_travel_document(1, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_bookings_listed_per_user() {
        let store = store();
        let johns = store.list_bookings(2).await.unwrap();
        assert_eq!(johns.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 4]);
        assert!(store.list_bookings(1).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(store());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_hotel(new_hotel(&format!("Hotel {}", i)))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()));
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(store.counts()[1], 5 + 32);
    }
}
