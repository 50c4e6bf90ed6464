//! ExploreNow Server
//!
//! HTTP API for the travel catalog: hotels, trip packages, bookings, reviews
//! and travel documents, served from PostgreSQL or an in-memory store chosen
//! once at startup.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod storage;

pub use state::AppState;

use axum::handler::Handler;
use axum::routing::{any, get, post, put};
use axum::Router;
use handlers::{
    admin, auth, bookings, documents, hotels, performance, reviews, tools, trips, users,
};
use middleware::CachePolicy;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let no_store = CachePolicy::NoStore.layer();
    let short = CachePolicy::Short.layer();
    let medium = CachePolicy::Medium.layer();

    let api = Router::new()
        // Auth
        .route(
            "/api/auth/register",
            post(auth::register.layer(no_store.clone())),
        )
        .route("/api/auth/login", post(auth::login.layer(no_store.clone())))
        .route(
            "/api/users/:id",
            get(users::get.layer(short.clone())).put(users::update.layer(no_store.clone())),
        )
        // Catalog
        .route(
            "/api/hotels",
            get(hotels::list.layer(short.clone())).post(hotels::create.layer(no_store.clone())),
        )
        .route(
            "/api/hotels/:id",
            get(hotels::get.layer(short.clone())).put(hotels::update.layer(no_store.clone())),
        )
        .route(
            "/api/trips/packages",
            get(trips::list.layer(short.clone())).post(trips::create.layer(no_store.clone())),
        )
        .route(
            "/api/trips/packages/:id",
            get(trips::get.layer(short.clone())).put(trips::update.layer(no_store.clone())),
        )
        // Bookings
        .route(
            "/api/bookings",
            post(bookings::create.layer(no_store.clone())),
        )
        .route(
            "/api/bookings/:id",
            get(bookings::list_for_user.layer(short.clone())),
        )
        .route(
            "/api/bookings/:id/status",
            put(bookings::update_status.layer(no_store.clone())),
        )
        // Reviews
        .route(
            "/api/reviews",
            get(reviews::list.layer(short.clone())).post(reviews::create.layer(no_store.clone())),
        )
        .route(
            "/api/reviews/:id/helpful",
            post(reviews::mark_helpful.layer(no_store.clone())),
        )
        // Travel documents
        .route(
            "/api/documents",
            post(documents::create.layer(no_store.clone())),
        )
        .route(
            "/api/documents/:id",
            get(documents::list_for_user.layer(short.clone()))
                .delete(documents::delete.layer(no_store.clone())),
        )
        // Tools
        .route(
            "/api/tools/expenses-tracker",
            post(tools::expenses_tracker.layer(no_store.clone())),
        )
        .route(
            "/api/tools/visa-check",
            post(tools::visa_check.layer(no_store.clone())),
        )
        .route(
            "/api/tools/mood-quiz/:mood",
            get(tools::mood_quiz.layer(medium)),
        )
        // Operations
        .route(
            "/api/performance",
            get(performance::report.layer(no_store.clone()))
                .delete(performance::reset.layer(no_store.clone())),
        )
        .route(
            "/api/admin/cache/clear",
            post(admin::clear_cache.layer(no_store.clone())),
        )
        .route("/api/*rest", any(handlers::api_not_found.layer(no_store)))
        .route("/health", get(handlers::health));

    let app = match static_dir {
        Some(dir) => api
            .nest_service(
                "/assets",
                ServiceBuilder::new()
                    .layer(CachePolicy::Long.layer())
                    .service(ServeDir::new(dir.join("assets"))),
            )
            // SPA fallback: unknown paths serve index.html
            .fallback_service(ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))),
        None => api,
    };

    app.layer(axum::middleware::from_fn_with_state(
        state.perf.clone(),
        middleware::performance::track,
    ))
    .layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, PgStore};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
    use axum::http::{HeaderMap, Method, Request, StatusCode};
    use bytes::Bytes;
    use explorenow_core::ports::{
        BookingStore, HotelStore, ReviewStore, TravelDocumentStore, TripPackageStore, UserStore,
    };
    use explorenow_core::{
        Booking, BookingStatus, CatalogFilter, Hotel, HotelPatch, Id, NewBooking, NewHotel,
        NewReview, NewTravelDocument, NewTripPackage, NewUser, Result, Review, ReviewFilter,
        Storage, TravelDocument, TripPackage, TripPackagePatch, User, UserPatch,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// In-memory store that counts catalog reads reaching the backend.
    struct CountingStore {
        inner: MemoryStore,
        hotel_reads: AtomicUsize,
        package_reads: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::with_fixtures().unwrap(),
                hotel_reads: AtomicUsize::new(0),
                package_reads: AtomicUsize::new(0),
            }
        }

        fn hotel_reads(&self) -> usize {
            self.hotel_reads.load(Ordering::SeqCst)
        }

        fn package_reads(&self) -> usize {
            self.package_reads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HotelStore for CountingStore {
        async fn list_hotels(&self, filter: CatalogFilter) -> Result<Vec<Hotel>> {
            self.hotel_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.list_hotels(filter).await
        }
        async fn get_hotel(&self, id: Id) -> Result<Option<Hotel>> {
            self.hotel_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get_hotel(id).await
        }
        async fn create_hotel(&self, hotel: NewHotel) -> Result<Hotel> {
            self.inner.create_hotel(hotel).await
        }
        async fn update_hotel(&self, id: Id, patch: HotelPatch) -> Result<Option<Hotel>> {
            self.inner.update_hotel(id, patch).await
        }
    }

    #[async_trait]
    impl UserStore for CountingStore {
        async fn get_user(&self, id: Id) -> Result<Option<User>> {
            self.inner.get_user(id).await
        }
        async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
            self.inner.get_user_by_username(username).await
        }
        async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
            self.inner.get_user_by_email(email).await
        }
        async fn create_user(&self, user: NewUser) -> Result<User> {
            self.inner.create_user(user).await
        }
        async fn update_user(&self, id: Id, patch: UserPatch) -> Result<Option<User>> {
            self.inner.update_user(id, patch).await
        }
    }

    #[async_trait]
    impl TripPackageStore for CountingStore {
        async fn list_trip_packages(&self, filter: CatalogFilter) -> Result<Vec<TripPackage>> {
            self.package_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.list_trip_packages(filter).await
        }
        async fn get_trip_package(&self, id: Id) -> Result<Option<TripPackage>> {
            self.package_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get_trip_package(id).await
        }
        async fn create_trip_package(&self, package: NewTripPackage) -> Result<TripPackage> {
            self.inner.create_trip_package(package).await
        }
        async fn update_trip_package(
            &self,
            id: Id,
            patch: TripPackagePatch,
        ) -> Result<Option<TripPackage>> {
            self.inner.update_trip_package(id, patch).await
        }
    }

    #[async_trait]
    impl BookingStore for CountingStore {
        async fn list_bookings(&self, user_id: Id) -> Result<Vec<Booking>> {
            self.inner.list_bookings(user_id).await
        }
        async fn get_booking(&self, id: Id) -> Result<Option<Booking>> {
            self.inner.get_booking(id).await
        }
        async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
            self.inner.create_booking(booking).await
        }
        async fn update_booking_status(
            &self,
            id: Id,
            status: BookingStatus,
        ) -> Result<Option<Booking>> {
            self.inner.update_booking_status(id, status).await
        }
    }

    #[async_trait]
    impl ReviewStore for CountingStore {
        async fn list_reviews(&self, filter: ReviewFilter) -> Result<Vec<Review>> {
            self.inner.list_reviews(filter).await
        }
        async fn get_review(&self, id: Id) -> Result<Option<Review>> {
            self.inner.get_review(id).await
        }
        async fn create_review(&self, review: NewReview) -> Result<Review> {
            self.inner.create_review(review).await
        }
        async fn mark_review_helpful(&self, id: Id) -> Result<Option<Review>> {
            self.inner.mark_review_helpful(id).await
        }
    }

    #[async_trait]
    impl TravelDocumentStore for CountingStore {
        async fn list_travel_documents(&self, user_id: Id) -> Result<Vec<TravelDocument>> {
            self.inner.list_travel_documents(user_id).await
        }
        async fn get_travel_document(&self, id: Id) -> Result<Option<TravelDocument>> {
            self.inner.get_travel_document(id).await
        }
        async fn create_travel_document(&self, doc: NewTravelDocument) -> Result<TravelDocument> {
            self.inner.create_travel_document(doc).await
        }
        async fn delete_travel_document(&self, id: Id, owner_id: Id) -> Result<bool> {
            self.inner.delete_travel_document(id, owner_id).await
        }
    }

    fn app_with(store: Arc<dyn Storage>) -> Router {
        build_router(AppState::new(store, "memory"), None)
    }

    fn memory_app() -> Router {
        app_with(Arc::new(MemoryStore::with_fixtures().unwrap()))
    }

    struct Reply {
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    }

    impl Reply {
        fn json(&self) -> Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Reply {
            status,
            headers,
            body,
        }
    }

    fn new_hotel_json() -> Value {
        json!({
            "name": "Umaid Bhawan Palace",
            "location": "Jodhpur, Rajasthan",
            "pricePerNight": 35000,
            "rating": 4.9,
            "amenities": ["Spa", "Museum"]
        })
    }

    #[tokio::test]
    async fn test_in_memory_catalog_is_populated() {
        let app = memory_app();

        let hotels = send(&app, Method::GET, "/api/hotels", None).await;
        assert_eq!(hotels.status, StatusCode::OK);
        assert_eq!(hotels.json().as_array().unwrap().len(), 5);
        assert_eq!(hotels.headers[CACHE_CONTROL], "private, max-age=300");

        let packages = send(&app, Method::GET, "/api/trips/packages", None).await;
        assert_eq!(packages.json().as_array().unwrap().len(), 5);

        let reviews = send(&app, Method::GET, "/api/reviews", None).await;
        assert_eq!(reviews.json().as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_created_hotel_served_from_cache() {
        let store = Arc::new(CountingStore::new());
        let app = app_with(store.clone());

        let created = send(&app, Method::POST, "/api/hotels", Some(new_hotel_json())).await;
        assert_eq!(created.status, StatusCode::OK);
        assert_eq!(created.headers[CACHE_CONTROL], "no-store, no-cache, must-revalidate");
        let id = created.json()["id"].as_i64().unwrap();

        let fetched = send(&app, Method::GET, &format!("/api/hotels/{}", id), None).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, created.body);
        assert_eq!(store.hotel_reads(), 0);
    }

    #[tokio::test]
    async fn test_list_cached_until_write() {
        let store = Arc::new(CountingStore::new());
        let app = app_with(store.clone());

        send(&app, Method::GET, "/api/hotels", None).await;
        send(&app, Method::GET, "/api/hotels", None).await;
        assert_eq!(store.hotel_reads(), 1);

        // Creating a hotel invalidates the list.
        send(&app, Method::POST, "/api/hotels", Some(new_hotel_json())).await;
        let hotels = send(&app, Method::GET, "/api/hotels", None).await;
        assert_eq!(hotels.json().as_array().unwrap().len(), 6);
        assert_eq!(store.hotel_reads(), 2);

        let cleared = send(&app, Method::POST, "/api/admin/cache/clear", None).await;
        assert_eq!(cleared.json()["success"], true);
        send(&app, Method::GET, "/api/hotels", None).await;
        assert_eq!(store.hotel_reads(), 3);
    }

    #[tokio::test]
    async fn test_update_refreshes_cached_item() {
        let store = Arc::new(CountingStore::new());
        let app = app_with(store.clone());

        send(&app, Method::GET, "/api/hotels/1", None).await;
        let updated = send(
            &app,
            Method::PUT,
            "/api/hotels/1",
            Some(json!({ "pricePerNight": 17500 })),
        )
        .await;
        assert_eq!(updated.status, StatusCode::OK);

        let fetched = send(&app, Method::GET, "/api/hotels/1", None).await;
        assert_eq!(fetched.json()["pricePerNight"], 17500.0);
        assert_eq!(store.hotel_reads(), 1);

        let missing = send(&app, Method::PUT, "/api/hotels/999", Some(json!({}))).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids() {
        let app = memory_app();

        let missing = send(&app, Method::GET, "/api/hotels/999", None).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.json(), json!({ "error": "Hotel not found" }));

        let malformed = send(&app, Method::GET, "/api/trips/packages/abc", None).await;
        assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
        assert!(malformed.json()["error"].is_string());
    }

    #[tokio::test]
    async fn test_booking_status_transitions() {
        let app = memory_app();

        let missing = send(
            &app,
            Method::PUT,
            "/api/bookings/999/status",
            Some(json!({ "status": "confirmed" })),
        )
        .await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let invalid = send(
            &app,
            Method::PUT,
            "/api/bookings/3/status",
            Some(json!({ "status": "shipped" })),
        )
        .await;
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let confirmed = send(
            &app,
            Method::PUT,
            "/api/bookings/3/status",
            Some(json!({ "status": "confirmed" })),
        )
        .await;
        assert_eq!(confirmed.status, StatusCode::OK);
        assert_eq!(confirmed.json()["status"], "confirmed");
    }

    #[tokio::test]
    async fn test_booking_references_checked() {
        let app = memory_app();

        let ok = send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(json!({ "userId": 3, "tripPackageId": 4, "totalPrice": 28000, "guests": 2 })),
        )
        .await;
        assert_eq!(ok.status, StatusCode::OK);
        let booking = ok.json();
        assert_eq!(booking["tripPackageId"], 4);
        assert_eq!(booking["hotelId"], Value::Null);
        assert_eq!(booking["status"], "pending");

        let dangling = send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(json!({ "userId": 3, "hotelId": 77, "totalPrice": 100 })),
        )
        .await;
        assert_eq!(dangling.status, StatusCode::BAD_REQUEST);

        let both = send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(json!({ "userId": 3, "hotelId": 1, "tripPackageId": 1, "totalPrice": 100 })),
        )
        .await;
        assert_eq!(both.status, StatusCode::BAD_REQUEST);
        assert!(both.json()["details"].is_string());

        let listed = send(&app, Method::GET, "/api/bookings/3", None).await;
        assert_eq!(listed.json().as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_review_filters() {
        let app = memory_app();

        let by_hotel = send(&app, Method::GET, "/api/reviews?hotelId=1", None).await;
        let reviews = by_hotel.json();
        let reviews = reviews.as_array().unwrap();
        assert!(!reviews.is_empty());
        assert!(reviews
            .iter()
            .all(|r| r["hotelId"] == 1 && r["tripPackageId"].is_null()));

        let both = send(&app, Method::GET, "/api/reviews?hotelId=1&tripPackageId=1", None).await;
        assert_eq!(both.status, StatusCode::BAD_REQUEST);

        let garbage = send(&app, Method::GET, "/api/reviews?hotelId=one", None).await;
        assert_eq!(garbage.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_review_submission_and_helpful_votes() {
        let app = memory_app();

        let created = send(
            &app,
            Method::POST,
            "/api/reviews",
            Some(json!({ "userId": 4, "hotelId": 5, "rating": 5, "helpful": 40, "verified": true })),
        )
        .await;
        assert_eq!(created.status, StatusCode::OK);
        let review = created.json();
        assert_eq!(review["helpful"], 0);
        assert_eq!(review["verified"], false);

        let voted = send(
            &app,
            Method::POST,
            &format!("/api/reviews/{}/helpful", review["id"]),
            None,
        )
        .await;
        assert_eq!(voted.json()["helpful"], 1);

        let out_of_range = send(
            &app,
            Method::POST,
            "/api/reviews",
            Some(json!({ "userId": 4, "hotelId": 5, "rating": 0 })),
        )
        .await;
        assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_document_delete_is_owner_scoped() {
        let app = memory_app();

        let stranger = send(&app, Method::DELETE, "/api/documents/1?userId=3", None).await;
        assert_eq!(stranger.status, StatusCode::NOT_FOUND);

        let owner = send(&app, Method::DELETE, "/api/documents/1?userId=2", None).await;
        assert_eq!(owner.status, StatusCode::NO_CONTENT);

        let remaining = send(&app, Method::GET, "/api/documents/2", None).await;
        assert!(remaining.json().as_array().unwrap().is_empty());

        let no_owner = send(&app, Method::DELETE, "/api/documents/2", None).await;
        assert_eq!(no_owner.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let app = memory_app();

        let registered = send(
            &app,
            Method::POST,
            "/api/auth/register",
            Some(json!({ "username": "ravi", "email": "ravi@example.com", "password": "monsoon1" })),
        )
        .await;
        assert_eq!(registered.status, StatusCode::OK);
        let body = registered.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["username"], "ravi");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("passwordHash").is_none());

        let duplicate = send(
            &app,
            Method::POST,
            "/api/auth/register",
            Some(json!({ "username": "ravi", "email": "other@example.com", "password": "monsoon1" })),
        )
        .await;
        assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

        let login = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "ravi", "password": "monsoon1" })),
        )
        .await;
        assert_eq!(login.status, StatusCode::OK);
        assert_eq!(login.json()["user"]["userType"], "user");
        assert_eq!(login.headers[CACHE_CONTROL], "no-store, no-cache, must-revalidate");

        let wrong = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "ravi@example.com", "password": "drought" })),
        )
        .await;
        let unknown = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": "drought" })),
        )
        .await;
        assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.body, unknown.body);

        let anonymous = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "password": "monsoon1" })),
        )
        .await;
        assert_eq!(anonymous.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_user_profile_update() {
        let app = memory_app();

        let updated = send(
            &app,
            Method::PUT,
            "/api/users/3",
            Some(json!({ "phone": "+91-9000000000" })),
        )
        .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.json()["phone"], "+91-9000000000");

        let taken = send(
            &app,
            Method::PUT,
            "/api/users/3",
            Some(json!({ "email": "john@example.com" })),
        )
        .await;
        assert_eq!(taken.status, StatusCode::BAD_REQUEST);

        let missing = send(&app, Method::GET, "/api/users/42", None).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tools() {
        let app = memory_app();

        let estimate = send(
            &app,
            Method::POST,
            "/api/tools/expenses-tracker",
            Some(json!({ "from": "Delhi", "to": "Leh", "mode": "flight", "travelers": 2 })),
        )
        .await;
        assert_eq!(estimate.status, StatusCode::OK);
        assert_eq!(estimate.json()["total"], 30000.0);

        let visa = send(
            &app,
            Method::POST,
            "/api/tools/visa-check",
            Some(json!({ "nationality": "Indian", "destination": "France" })),
        )
        .await;
        assert_eq!(visa.json()["visaRequired"], true);

        let mood = send(&app, Method::GET, "/api/tools/mood-quiz/adventure", None).await;
        assert_eq!(mood.headers[CACHE_CONTROL], "public, max-age=3600");
        assert_eq!(mood.json()["destinations"][0], "Rishikesh");
    }

    #[tokio::test]
    async fn test_performance_report_covers_api_only() {
        let app = memory_app();

        send(&app, Method::GET, "/api/hotels", None).await;
        send(&app, Method::GET, "/api/hotels", None).await;
        send(&app, Method::GET, "/health", None).await;

        let report = send(&app, Method::GET, "/api/performance", None).await;
        let body = report.json();
        let metrics = body["metrics"].as_array().unwrap();
        let hotels = metrics
            .iter()
            .find(|m| m["endpoint"] == "/api/hotels")
            .unwrap();
        assert_eq!(hotels["method"], "GET");
        assert_eq!(hotels["count"], 2);
        assert!(metrics.iter().all(|m| m["endpoint"] != "/health"));
        assert!(body["slowEndpoints"].is_array());
        assert!(body["timestamp"].is_string());

        let reset = send(&app, Method::DELETE, "/api/performance", None).await;
        assert_eq!(reset.status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_unconfigured_backend_is_server_error() {
        let app = app_with(Arc::new(PgStore::unconfigured()));

        let hotels = send(&app, Method::GET, "/api/hotels", None).await;
        assert_eq!(hotels.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hotels.json(), json!({ "error": "Failed to fetch hotels" }));

        let health = send(&app, Method::GET, "/health", None).await;
        assert_eq!(health.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cached_entry_expires() {
        tokio::time::pause();
        let store = Arc::new(CountingStore::new());
        let state = AppState::new(store.clone(), "memory")
            .with_cache_ttl(std::time::Duration::from_secs(5));
        let app = build_router(state, None);

        send(&app, Method::GET, "/api/hotels/2", None).await;
        send(&app, Method::GET, "/api/hotels/2", None).await;
        assert_eq!(store.hotel_reads(), 1);

        tokio::time::advance(std::time::Duration::from_secs(5)).await;
        let again = send(&app, Method::GET, "/api/hotels/2", None).await;
        tokio_test::assert_ok!(serde_json::from_slice::<Value>(&again.body));
        assert_eq!(store.hotel_reads(), 2);
    }

    #[tokio::test]
    async fn test_trip_package_write_through() {
        let store = Arc::new(CountingStore::new());
        let app = app_with(store.clone());

        let listed = send(&app, Method::GET, "/api/trips/packages", None).await;
        assert_eq!(listed.json().as_array().unwrap().len(), 5);
        assert_eq!(store.package_reads(), 1);

        let created = send(
            &app,
            Method::POST,
            "/api/trips/packages",
            Some(json!({
                "name": "Spiti Valley Circuit",
                "location": "Himachal Pradesh",
                "duration": "8 days / 7 nights",
                "price": 42000,
                "category": ["Adventure"]
            })),
        )
        .await;
        assert_eq!(created.status, StatusCode::OK);
        assert_eq!(created.headers[CACHE_CONTROL], "no-store, no-cache, must-revalidate");
        let id = created.json()["id"].as_i64().unwrap();

        let fetched = send(&app, Method::GET, &format!("/api/trips/packages/{}", id), None).await;
        assert_eq!(fetched.body, created.body);
        assert_eq!(store.package_reads(), 1);

        let updated = send(
            &app,
            Method::PUT,
            &format!("/api/trips/packages/{}", id),
            Some(json!({ "price": 39500, "isRecommended": true })),
        )
        .await;
        assert_eq!(updated.status, StatusCode::OK);

        let fetched = send(&app, Method::GET, &format!("/api/trips/packages/{}", id), None).await;
        assert_eq!(fetched.json()["price"], 39500.0);
        assert_eq!(fetched.json()["isRecommended"], true);
        assert_eq!(store.package_reads(), 1);

        // The list was dropped by the writes and is re-read once.
        let listed = send(&app, Method::GET, "/api/trips/packages", None).await;
        assert_eq!(listed.json().as_array().unwrap().len(), 6);
        send(&app, Method::GET, "/api/trips/packages", None).await;
        assert_eq!(store.package_reads(), 2);

        let missing = send(&app, Method::PUT, "/api/trips/packages/999", Some(json!({}))).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_include_inactive_bypasses_cache() {
        let store = Arc::new(CountingStore::new());
        let app = app_with(store.clone());

        let hidden = send(
            &app,
            Method::PUT,
            "/api/hotels/2",
            Some(json!({ "status": "inactive" })),
        )
        .await;
        assert_eq!(hidden.json()["status"], "inactive");

        let active = send(&app, Method::GET, "/api/hotels", None).await;
        let active = active.json();
        assert_eq!(active.as_array().unwrap().len(), 4);
        assert!(active.as_array().unwrap().iter().all(|h| h["id"] != 2));
        assert_eq!(store.hotel_reads(), 1);

        for expected_reads in [2, 3] {
            let all = send(&app, Method::GET, "/api/hotels?includeInactive=true", None).await;
            let all = all.json();
            assert_eq!(all.as_array().unwrap().len(), 5);
            assert!(all.as_array().unwrap().iter().any(|h| h["id"] == 2));
            assert_eq!(store.hotel_reads(), expected_reads);
        }

        // The cached active list is untouched by the full listing.
        let active = send(&app, Method::GET, "/api/hotels", None).await;
        assert_eq!(active.json().as_array().unwrap().len(), 4);
        assert_eq!(store.hotel_reads(), 3);

        send(
            &app,
            Method::PUT,
            "/api/trips/packages/3",
            Some(json!({ "status": "maintenance" })),
        )
        .await;
        let packages = send(&app, Method::GET, "/api/trips/packages", None).await;
        assert_eq!(packages.json().as_array().unwrap().len(), 4);
        let all = send(&app, Method::GET, "/api/trips/packages?includeInactive=true", None).await;
        assert_eq!(all.json().as_array().unwrap().len(), 5);
        assert_eq!(store.package_reads(), 2);
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_not_found() {
        let app = memory_app();

        let missing = send(&app, Method::GET, "/api/does-not-exist", None).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.json(), json!({ "error": "Endpoint not found" }));
    }

    #[tokio::test]
    async fn test_static_assets_use_long_policy() {
        let dir = std::env::temp_dir().join(format!("explorenow-static-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("index.html"), "<html>ExploreNow</html>").unwrap();
        std::fs::write(dir.join("assets").join("app.js"), "console.log(1)").unwrap();

        let store: Arc<dyn Storage> = Arc::new(MemoryStore::with_fixtures().unwrap());
        let app = build_router(AppState::new(store, "memory"), Some(dir.as_path()));

        let asset = send(&app, Method::GET, "/assets/app.js", None).await;
        assert_eq!(asset.status, StatusCode::OK);
        assert_eq!(
            asset.headers[CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );

        let page = send(&app, Method::GET, "/trips/planner", None).await;
        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.body, Bytes::from_static(b"<html>ExploreNow</html>"));

        // Unknown API paths never fall through to the page.
        let api = send(&app, Method::GET, "/api/does-not-exist", None).await;
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.headers[CONTENT_TYPE], "application/json");
        assert_eq!(api.json(), json!({ "error": "Endpoint not found" }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
