//! PostgreSQL storage backend

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use explorenow_core::ports::{
    BookingStore, HotelStore, ReviewStore, TravelDocumentStore, TripPackageStore, UserStore,
};
use explorenow_core::{
    Booking, BookingStatus, CatalogFilter, Hotel, HotelPatch, Id, ListingStatus, NewBooking,
    NewHotel, NewReview, NewTravelDocument, NewTripPackage, NewUser, Result, Review, ReviewFilter,
    StoreError, Target, TravelDocument, TripPackage, TripPackagePatch, User, UserPatch,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

/// Connection pool limits
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(30),
        }
    }
}

/// Strip the `psql '...'` wrapper some hosting dashboards put around the URL.
pub fn clean_database_url(url: &str) -> &str {
    let url = url.trim();
    let url = url.strip_prefix("psql '").unwrap_or(url);
    url.strip_suffix('\'').unwrap_or(url)
}

pub struct PgStore {
    pool: Option<PgPool>,
}

impl PgStore {
    /// A store with no connection; every operation fails with `Unconfigured`.
    pub fn unconfigured() -> Self {
        Self { pool: None }
    }

    pub async fn connect(database_url: &str, settings: &PoolSettings) -> anyhow::Result<Self> {
        let url = clean_database_url(database_url);
        tracing::info!(
            "Connecting to PostgreSQL (max {} connections)...",
            settings.max_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(settings.idle_timeout)
            .connect(url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        tracing::info!("PostgreSQL connection established, running migrations...");
        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database initialization complete");

        Ok(Self { pool: Some(pool) })
    }

    async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
        for statement in SCHEMA.iter().chain(INDEXES) {
            sqlx::query(statement).execute(pool).await?;
        }
        Ok(())
    }

    fn pool(&self) -> Result<&PgPool> {
        self.pool.as_ref().ok_or(StoreError::Unconfigured)
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        first_name TEXT,
        last_name TEXT,
        phone TEXT,
        user_type TEXT NOT NULL DEFAULT 'user',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hotels (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        location TEXT NOT NULL,
        address TEXT,
        price_per_night DOUBLE PRECISION NOT NULL,
        rating DOUBLE PRECISION NOT NULL DEFAULT 0,
        amenities JSONB NOT NULL DEFAULT '[]',
        images JSONB NOT NULL DEFAULT '[]',
        status TEXT NOT NULL DEFAULT 'active',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS trip_packages (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        location TEXT NOT NULL,
        duration TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        rating DOUBLE PRECISION NOT NULL DEFAULT 0,
        category JSONB NOT NULL DEFAULT '[]',
        inclusions JSONB NOT NULL DEFAULT '[]',
        images JSONB NOT NULL DEFAULT '[]',
        status TEXT NOT NULL DEFAULT 'active',
        is_recommended BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        hotel_id INTEGER REFERENCES hotels(id),
        trip_package_id INTEGER REFERENCES trip_packages(id),
        check_in TIMESTAMPTZ,
        check_out TIMESTAMPTZ,
        guests INTEGER NOT NULL DEFAULT 1,
        total_price DOUBLE PRECISION NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        booking_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CHECK ((hotel_id IS NULL) <> (trip_package_id IS NULL))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        hotel_id INTEGER REFERENCES hotels(id),
        trip_package_id INTEGER REFERENCES trip_packages(id),
        rating INTEGER NOT NULL,
        review_text TEXT,
        date_stayed TIMESTAMPTZ,
        helpful INTEGER NOT NULL DEFAULT 0,
        verified BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CHECK ((hotel_id IS NULL) <> (trip_package_id IS NULL))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS travel_documents (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        file_name TEXT NOT NULL,
        file_type TEXT NOT NULL,
        file_path TEXT NOT NULL,
        document_type TEXT,
        upload_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_users_user_type ON users(user_type)",
    "CREATE INDEX IF NOT EXISTS idx_hotels_location ON hotels(location)",
    "CREATE INDEX IF NOT EXISTS idx_hotels_status ON hotels(status)",
    "CREATE INDEX IF NOT EXISTS idx_hotels_price ON hotels(price_per_night)",
    "CREATE INDEX IF NOT EXISTS idx_hotels_rating ON hotels(rating DESC)",
    "CREATE INDEX IF NOT EXISTS idx_trip_packages_location ON trip_packages(location)",
    "CREATE INDEX IF NOT EXISTS idx_trip_packages_status ON trip_packages(status)",
    "CREATE INDEX IF NOT EXISTS idx_trip_packages_price ON trip_packages(price)",
    "CREATE INDEX IF NOT EXISTS idx_trip_packages_recommended ON trip_packages(is_recommended)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_user_id ON bookings(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_hotel_id ON bookings(hotel_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_trip_package_id ON bookings(trip_package_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_hotel_id ON reviews(hotel_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_trip_package_id ON reviews(trip_package_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_user_id ON reviews(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_travel_documents_user_id ON travel_documents(user_id)",
];

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, phone, \
     user_type, created_at, updated_at";
const HOTEL_COLUMNS: &str = "id, name, description, location, address, price_per_night, rating, \
     amenities, images, status, created_at, updated_at";
const TRIP_PACKAGE_COLUMNS: &str = "id, name, description, location, duration, price, rating, \
     category, inclusions, images, status, is_recommended, created_at, updated_at";
const BOOKING_COLUMNS: &str = "id, user_id, hotel_id, trip_package_id, check_in, check_out, \
     guests, total_price, status, booking_date, created_at, updated_at";
const REVIEW_COLUMNS: &str = "id, user_id, hotel_id, trip_package_id, rating, review_text, \
     date_stayed, helpful, verified, created_at, updated_at";
const DOCUMENT_COLUMNS: &str = "id, user_id, file_name, file_type, file_path, document_type, \
     upload_date, created_at";

/// A foreign key a write depends on, used to name the culprit on violation.
struct Reference {
    column: &'static str,
    kind: &'static str,
    id: Id,
}

fn user_ref(id: Id) -> Reference {
    Reference {
        column: "user_id",
        kind: "user",
        id,
    }
}

fn target_ref(target: Target) -> Reference {
    match target {
        Target::Hotel(id) => Reference {
            column: "hotel_id",
            kind: "hotel",
            id,
        },
        Target::TripPackage(id) => Reference {
            column: "trip_package_id",
            kind: "trip package",
            id,
        },
    }
}

fn db_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let what = db.constraint().unwrap_or("unique constraint");
            return StoreError::Conflict(format!("{} violated", what));
        }
    }
    StoreError::Database(e.to_string())
}

fn write_error(e: sqlx::Error, refs: &[Reference]) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            let constraint = db.constraint().unwrap_or_default();
            let culprit = refs
                .iter()
                .find(|r| constraint.contains(r.column))
                .or_else(|| refs.first());
            if let Some(r) = culprit {
                return StoreError::InvalidReference {
                    kind: r.kind,
                    id: r.id,
                };
            }
        }
    }
    db_error(e)
}

fn parse_column<T>(value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e: T::Err| StoreError::Internal(format!("Corrupt row: {}", e)))
}

fn target_of(hotel_id: Option<Id>, trip_package_id: Option<Id>) -> Result<Target> {
    Target::from_parts(hotel_id, trip_package_id)
        .map_err(|e| StoreError::Internal(format!("Corrupt row: {}", e)))
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Id,
    username: String,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    user_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(r: UserRow) -> Result<Self> {
        Ok(User {
            id: r.id,
            username: r.username,
            email: r.email,
            password_hash: r.password_hash,
            first_name: r.first_name,
            last_name: r.last_name,
            phone: r.phone,
            user_type: parse_column(&r.user_type)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: Id,
    name: String,
    description: Option<String>,
    location: String,
    address: Option<String>,
    price_per_night: f64,
    rating: f64,
    amenities: Json<Vec<String>>,
    images: Json<Vec<String>>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<HotelRow> for Hotel {
    type Error = StoreError;

    fn try_from(r: HotelRow) -> Result<Self> {
        Ok(Hotel {
            id: r.id,
            name: r.name,
            description: r.description,
            location: r.location,
            address: r.address,
            price_per_night: r.price_per_night,
            rating: r.rating,
            amenities: r.amenities.0,
            images: r.images.0,
            status: parse_column(&r.status)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TripPackageRow {
    id: Id,
    name: String,
    description: Option<String>,
    location: String,
    duration: String,
    price: f64,
    rating: f64,
    category: Json<Vec<String>>,
    inclusions: Json<Vec<String>>,
    images: Json<Vec<String>>,
    status: String,
    is_recommended: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TripPackageRow> for TripPackage {
    type Error = StoreError;

    fn try_from(r: TripPackageRow) -> Result<Self> {
        Ok(TripPackage {
            id: r.id,
            name: r.name,
            description: r.description,
            location: r.location,
            duration: r.duration,
            price: r.price,
            rating: r.rating,
            category: r.category.0,
            inclusions: r.inclusions.0,
            images: r.images.0,
            status: parse_column(&r.status)?,
            is_recommended: r.is_recommended,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Id,
    user_id: Id,
    hotel_id: Option<Id>,
    trip_package_id: Option<Id>,
    check_in: Option<DateTime<Utc>>,
    check_out: Option<DateTime<Utc>>,
    guests: i32,
    total_price: f64,
    status: String,
    booking_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(r: BookingRow) -> Result<Self> {
        Ok(Booking {
            id: r.id,
            user_id: r.user_id,
            target: target_of(r.hotel_id, r.trip_package_id)?,
            check_in: r.check_in,
            check_out: r.check_out,
            guests: r.guests,
            total_price: r.total_price,
            status: parse_column(&r.status)?,
            booking_date: r.booking_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Id,
    user_id: Id,
    hotel_id: Option<Id>,
    trip_package_id: Option<Id>,
    rating: i32,
    review_text: Option<String>,
    date_stayed: Option<DateTime<Utc>>,
    helpful: i32,
    verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = StoreError;

    fn try_from(r: ReviewRow) -> Result<Self> {
        Ok(Review {
            id: r.id,
            user_id: r.user_id,
            target: target_of(r.hotel_id, r.trip_package_id)?,
            rating: r.rating,
            review_text: r.review_text,
            date_stayed: r.date_stayed,
            helpful: r.helpful,
            verified: r.verified,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Id,
    user_id: Id,
    file_name: String,
    file_type: String,
    file_path: String,
    document_type: Option<String>,
    upload_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<DocumentRow> for TravelDocument {
    fn from(r: DocumentRow) -> Self {
        TravelDocument {
            id: r.id,
            user_id: r.user_id,
            file_name: r.file_name,
            file_type: r.file_type,
            file_path: r.file_path,
            document_type: r.document_type,
            upload_date: r.upload_date,
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn get_user(&self, id: Id) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id)
                .fetch_optional(self.pool()?)
                .await
                .map_err(db_error)?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
                .bind(email)
                .fetch_optional(self.pool()?)
                .await
                .map_err(db_error)?;

        row.map(User::try_from).transpose()
    }

    async fn create_user(&self, new: NewUser) -> Result<User> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, first_name, last_name, phone, user_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.phone)
        .bind(new.user_type.to_string())
        .fetch_one(self.pool()?)
        .await
        .map_err(db_error)?;

        row.try_into()
    }

    async fn update_user(&self, id: Id, patch: UserPatch) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone = COALESCE($5, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(&patch.email)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.phone)
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl HotelStore for PgStore {
    async fn list_hotels(&self, filter: CatalogFilter) -> Result<Vec<Hotel>> {
        let rows: Vec<HotelRow> = match filter {
            CatalogFilter::ActiveOnly => {
                sqlx::query_as::<_, HotelRow>(&format!(
                    "SELECT {} FROM hotels WHERE status = $1 ORDER BY id",
                    HOTEL_COLUMNS
                ))
                .bind(ListingStatus::Active.to_string())
                .fetch_all(self.pool()?)
                .await
            }
            CatalogFilter::All => {
                sqlx::query_as::<_, HotelRow>(&format!("SELECT {} FROM hotels ORDER BY id", HOTEL_COLUMNS))
                    .fetch_all(self.pool()?)
                    .await
            }
        }
        .map_err(db_error)?;

        convert_all(rows)
    }

    async fn get_hotel(&self, id: Id) -> Result<Option<Hotel>> {
        let row: Option<HotelRow> =
            sqlx::query_as(&format!("SELECT {} FROM hotels WHERE id = $1", HOTEL_COLUMNS))
                .bind(id)
                .fetch_optional(self.pool()?)
                .await
                .map_err(db_error)?;

        row.map(Hotel::try_from).transpose()
    }

    async fn create_hotel(&self, new: NewHotel) -> Result<Hotel> {
        let row: HotelRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO hotels (name, description, location, address, price_per_night,
                                rating, amenities, images, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            HOTEL_COLUMNS
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.location)
        .bind(&new.address)
        .bind(new.price_per_night)
        .bind(new.rating)
        .bind(Json(&new.amenities))
        .bind(Json(&new.images))
        .bind(new.status.to_string())
        .fetch_one(self.pool()?)
        .await
        .map_err(db_error)?;

        row.try_into()
    }

    async fn update_hotel(&self, id: Id, patch: HotelPatch) -> Result<Option<Hotel>> {
        let row: Option<HotelRow> = sqlx::query_as(&format!(
            r#"
            UPDATE hotels SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                address = COALESCE($5, address),
                price_per_night = COALESCE($6, price_per_night),
                rating = COALESCE($7, rating),
                amenities = COALESCE($8, amenities),
                images = COALESCE($9, images),
                status = COALESCE($10, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            HOTEL_COLUMNS
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.location)
        .bind(&patch.address)
        .bind(patch.price_per_night)
        .bind(patch.rating)
        .bind(patch.amenities.as_ref().map(Json))
        .bind(patch.images.as_ref().map(Json))
        .bind(patch.status.map(|s| s.to_string()))
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        row.map(Hotel::try_from).transpose()
    }
}

#[async_trait]
impl TripPackageStore for PgStore {
    async fn list_trip_packages(&self, filter: CatalogFilter) -> Result<Vec<TripPackage>> {
        let rows: Vec<TripPackageRow> = match filter {
            CatalogFilter::ActiveOnly => {
                sqlx::query_as::<_, TripPackageRow>(&format!(
                    "SELECT {} FROM trip_packages WHERE status = $1 ORDER BY id",
                    TRIP_PACKAGE_COLUMNS
                ))
                .bind(ListingStatus::Active.to_string())
                .fetch_all(self.pool()?)
                .await
            }
            CatalogFilter::All => {
                sqlx::query_as::<_, TripPackageRow>(&format!(
                    "SELECT {} FROM trip_packages ORDER BY id",
                    TRIP_PACKAGE_COLUMNS
                ))
                .fetch_all(self.pool()?)
                .await
            }
        }
        .map_err(db_error)?;

        convert_all(rows)
    }

    async fn get_trip_package(&self, id: Id) -> Result<Option<TripPackage>> {
        let row: Option<TripPackageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM trip_packages WHERE id = $1",
            TRIP_PACKAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        row.map(TripPackage::try_from).transpose()
    }

    async fn create_trip_package(&self, new: NewTripPackage) -> Result<TripPackage> {
        let row: TripPackageRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO trip_packages (name, description, location, duration, price, rating,
                                       category, inclusions, images, status, is_recommended)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            TRIP_PACKAGE_COLUMNS
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.location)
        .bind(&new.duration)
        .bind(new.price)
        .bind(new.rating)
        .bind(Json(&new.category))
        .bind(Json(&new.inclusions))
        .bind(Json(&new.images))
        .bind(new.status.to_string())
        .bind(new.is_recommended)
        .fetch_one(self.pool()?)
        .await
        .map_err(db_error)?;

        row.try_into()
    }

    async fn update_trip_package(
        &self,
        id: Id,
        patch: TripPackagePatch,
    ) -> Result<Option<TripPackage>> {
        let row: Option<TripPackageRow> = sqlx::query_as(&format!(
            r#"
            UPDATE trip_packages SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                duration = COALESCE($5, duration),
                price = COALESCE($6, price),
                rating = COALESCE($7, rating),
                category = COALESCE($8, category),
                inclusions = COALESCE($9, inclusions),
                images = COALESCE($10, images),
                status = COALESCE($11, status),
                is_recommended = COALESCE($12, is_recommended),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TRIP_PACKAGE_COLUMNS
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.location)
        .bind(&patch.duration)
        .bind(patch.price)
        .bind(patch.rating)
        .bind(patch.category.as_ref().map(Json))
        .bind(patch.inclusions.as_ref().map(Json))
        .bind(patch.images.as_ref().map(Json))
        .bind(patch.status.map(|s| s.to_string()))
        .bind(patch.is_recommended)
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        row.map(TripPackage::try_from).transpose()
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn list_bookings(&self, user_id: Id) -> Result<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY id",
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(self.pool()?)
        .await
        .map_err(db_error)?;

        convert_all(rows)
    }

    async fn get_booking(&self, id: Id) -> Result<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        row.map(Booking::try_from).transpose()
    }

    async fn create_booking(&self, new: NewBooking) -> Result<Booking> {
        let refs = [user_ref(new.user_id), target_ref(new.target)];
        let row: BookingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO bookings (user_id, hotel_id, trip_package_id, check_in, check_out,
                                  guests, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(new.user_id)
        .bind(new.target.hotel_id())
        .bind(new.target.trip_package_id())
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.guests)
        .bind(new.total_price)
        .bind(new.status.to_string())
        .fetch_one(self.pool()?)
        .await
        .map_err(|e| write_error(e, &refs))?;

        row.try_into()
    }

    async fn update_booking_status(
        &self,
        id: Id,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .bind(status.to_string())
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        row.map(Booking::try_from).transpose()
    }
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn list_reviews(&self, filter: ReviewFilter) -> Result<Vec<Review>> {
        let rows: Vec<ReviewRow> = match filter {
            ReviewFilter::All => {
                sqlx::query_as::<_, ReviewRow>(&format!("SELECT {} FROM reviews ORDER BY id", REVIEW_COLUMNS))
                    .fetch_all(self.pool()?)
                    .await
            }
            ReviewFilter::Hotel(hotel_id) => {
                sqlx::query_as::<_, ReviewRow>(&format!(
                    "SELECT {} FROM reviews WHERE hotel_id = $1 ORDER BY id",
                    REVIEW_COLUMNS
                ))
                .bind(hotel_id)
                .fetch_all(self.pool()?)
                .await
            }
            ReviewFilter::TripPackage(package_id) => {
                sqlx::query_as::<_, ReviewRow>(&format!(
                    "SELECT {} FROM reviews WHERE trip_package_id = $1 ORDER BY id",
                    REVIEW_COLUMNS
                ))
                .bind(package_id)
                .fetch_all(self.pool()?)
                .await
            }
        }
        .map_err(db_error)?;

        convert_all(rows)
    }

    async fn get_review(&self, id: Id) -> Result<Option<Review>> {
        let row: Option<ReviewRow> =
            sqlx::query_as(&format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS))
                .bind(id)
                .fetch_optional(self.pool()?)
                .await
                .map_err(db_error)?;

        row.map(Review::try_from).transpose()
    }

    async fn create_review(&self, new: NewReview) -> Result<Review> {
        let refs = [user_ref(new.user_id), target_ref(new.target)];
        // helpful and verified always start at their column defaults.
        let row: ReviewRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO reviews (user_id, hotel_id, trip_package_id, rating, review_text, date_stayed)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(new.user_id)
        .bind(new.target.hotel_id())
        .bind(new.target.trip_package_id())
        .bind(new.rating)
        .bind(&new.review_text)
        .bind(new.date_stayed)
        .fetch_one(self.pool()?)
        .await
        .map_err(|e| write_error(e, &refs))?;

        row.try_into()
    }

    async fn mark_review_helpful(&self, id: Id) -> Result<Option<Review>> {
        let row: Option<ReviewRow> = sqlx::query_as(&format!(
            "UPDATE reviews SET helpful = helpful + 1, updated_at = NOW() WHERE id = $1 RETURNING {}",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        row.map(Review::try_from).transpose()
    }
}

#[async_trait]
impl TravelDocumentStore for PgStore {
    async fn list_travel_documents(&self, user_id: Id) -> Result<Vec<TravelDocument>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM travel_documents WHERE user_id = $1 ORDER BY id",
            DOCUMENT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(self.pool()?)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_travel_document(&self, id: Id) -> Result<Option<TravelDocument>> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM travel_documents WHERE id = $1",
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool()?)
        .await
        .map_err(db_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_travel_document(&self, new: NewTravelDocument) -> Result<TravelDocument> {
        let refs = [user_ref(new.user_id)];
        let row: DocumentRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO travel_documents (user_id, file_name, file_type, file_path, document_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(new.user_id)
        .bind(&new.file_name)
        .bind(&new.file_type)
        .bind(&new.file_path)
        .bind(&new.document_type)
        .fetch_one(self.pool()?)
        .await
        .map_err(|e| write_error(e, &refs))?;

        Ok(row.into())
    }

    async fn delete_travel_document(&self, id: Id, owner_id: Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM travel_documents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool()?)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
