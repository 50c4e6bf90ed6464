//! Sample catalog loaded into the in-memory store and used by `seed`
//!
//! Identities run 1..=n per kind and cross-references use those identities.

use crate::services::auth::hash_password;
use chrono::{DateTime, NaiveDate, Utc};
use explorenow_core::{
    Booking, BookingStatus, Hotel, Id, ListingStatus, NewBooking, NewHotel, NewReview,
    NewTravelDocument, NewTripPackage, NewUser, Result, Review, Storage, StoreError, Target,
    TravelDocument, TripPackage, User, UserType,
};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// Highest identity used by any fixture record
pub const MAX_FIXTURE_ID: Id = 5;

pub struct Fixtures {
    pub users: Vec<User>,
    pub hotels: Vec<Hotel>,
    pub trip_packages: Vec<TripPackage>,
    pub bookings: Vec<Booking>,
    pub reviews: Vec<Review>,
    pub travel_documents: Vec<TravelDocument>,
}

struct PasswordHashes {
    admin: String,
    member: String,
}

static PASSWORD_HASHES: OnceCell<PasswordHashes> = OnceCell::new();

fn password_hashes() -> Result<&'static PasswordHashes> {
    PASSWORD_HASHES.get_or_try_init(|| {
        let hash = |plain: &str| {
            hash_password(plain).map_err(|e| StoreError::Internal(format!("{:#}", e)))
        };
        Ok(PasswordHashes {
            admin: hash("admin123")?,
            member: hash("password123")?,
        })
    })
}

fn date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Fixtures {
    pub fn load() -> Result<Self> {
        let hashes = password_hashes()?;
        let now = Utc::now();

        let user = |id: Id, username: &str, email: &str, first: &str, last: &str, phone: &str| {
            let (password_hash, user_type) = if id == 1 {
                (hashes.admin.clone(), UserType::Admin)
            } else {
                (hashes.member.clone(), UserType::User)
            };
            User {
                id,
                username: username.into(),
                email: email.into(),
                password_hash,
                first_name: Some(first.into()),
                last_name: Some(last.into()),
                phone: Some(phone.into()),
                user_type,
                created_at: now,
                updated_at: now,
            }
        };

        let users = vec![
            user(1, "admin", "admin@explorenow.com", "Admin", "User", "+91-9876543210"),
            user(2, "john_doe", "john@example.com", "John", "Doe", "+91-9876543211"),
            user(3, "jane_smith", "jane@example.com", "Jane", "Smith", "+91-9876543212"),
            user(4, "travel_guru", "guru@example.com", "Travel", "Guru", "+91-9876543213"),
        ];

        let hotel = |id: Id,
                     name: &str,
                     description: &str,
                     location: &str,
                     address: &str,
                     price: f64,
                     rating: f64,
                     amenities: &[&str],
                     images: &[&str]| Hotel {
            id,
            name: name.into(),
            description: Some(description.into()),
            location: location.into(),
            address: Some(address.into()),
            price_per_night: price,
            rating,
            amenities: strings(amenities),
            images: strings(images),
            status: ListingStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let hotels = vec![
            hotel(
                1,
                "Taj Mahal Palace, Mumbai",
                "Iconic luxury hotel overlooking the Gateway of India with world-class amenities and historic charm.",
                "Mumbai, Maharashtra",
                "Apollo Bunder, Colaba, Mumbai, Maharashtra 400001",
                15000.0,
                4.8,
                &["Wi-Fi", "Swimming Pool", "Spa", "Restaurant", "Gym", "Room Service", "Concierge"],
                &[
                    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800",
                    "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?w=800",
                ],
            ),
            hotel(
                2,
                "The Oberoi, New Delhi",
                "Luxury hotel in the heart of New Delhi with modern amenities and exceptional service.",
                "New Delhi, Delhi",
                "Dr. Zakir Hussain Marg, New Delhi, Delhi 110003",
                12000.0,
                4.7,
                &["Wi-Fi", "Swimming Pool", "Spa", "Restaurant", "Business Center", "Airport Shuttle"],
                &[
                    "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=800",
                    "https://images.unsplash.com/photo-1578683010236-d716f9a3f461?w=800",
                ],
            ),
            hotel(
                3,
                "ITC Grand Chola, Chennai",
                "Palatial luxury hotel inspired by Chola architecture with world-class facilities.",
                "Chennai, Tamil Nadu",
                "63, Mount Road, Guindy, Chennai, Tamil Nadu 600032",
                10000.0,
                4.6,
                &["Wi-Fi", "Swimming Pool", "Spa", "Multiple Restaurants", "Gym", "Business Center"],
                &[
                    "https://images.unsplash.com/photo-1563013544-824ae1b704d3?w=800",
                    "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=800",
                ],
            ),
            hotel(
                4,
                "Trident Nariman Point, Mumbai",
                "Contemporary business hotel with stunning views of the Arabian Sea.",
                "Mumbai, Maharashtra",
                "Nariman Point, Mumbai, Maharashtra 400021",
                8000.0,
                4.4,
                &["Wi-Fi", "Restaurant", "Gym", "Business Center", "Room Service"],
                &[
                    "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=800",
                    "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=800",
                ],
            ),
            hotel(
                5,
                "The Leela Palace, Bangalore",
                "Royal luxury hotel with traditional Indian hospitality and modern amenities.",
                "Bangalore, Karnataka",
                "23, Kodihalli, HAL Airport Road, Bangalore, Karnataka 560008",
                9000.0,
                4.5,
                &["Wi-Fi", "Swimming Pool", "Spa", "Restaurant", "Gym", "Airport Shuttle"],
                &[
                    "https://images.unsplash.com/photo-1564501049412-61c2a3083791?w=800",
                    "https://images.unsplash.com/photo-1590490360182-c33d57733427?w=800",
                ],
            ),
        ];

        let package = |id: Id,
                       name: &str,
                       description: &str,
                       location: &str,
                       duration: &str,
                       price: f64,
                       rating: f64,
                       category: &[&str],
                       inclusions: &[&str],
                       images: &[&str],
                       is_recommended: bool| TripPackage {
            id,
            name: name.into(),
            description: Some(description.into()),
            location: location.into(),
            duration: duration.into(),
            price,
            rating,
            category: strings(category),
            inclusions: strings(inclusions),
            images: strings(images),
            status: ListingStatus::Active,
            is_recommended,
            created_at: now,
            updated_at: now,
        };

        let trip_packages = vec![
            package(
                1,
                "Golden Triangle Tour",
                "Experience the best of Delhi, Agra, and Jaipur in this classic 6-day tour covering India's most iconic destinations.",
                "Delhi, Agra, Jaipur",
                "6 days / 5 nights",
                25000.0,
                4.8,
                &["Cultural", "Historical", "Photography"],
                &["Hotels", "Transportation", "Breakfast", "Sightseeing", "Guide"],
                &[
                    "https://images.unsplash.com/photo-1564507592333-c60657eea523?w=800",
                    "https://images.unsplash.com/photo-1587474260584-136574528ed5?w=800",
                ],
                true,
            ),
            package(
                2,
                "Kerala Backwaters Experience",
                "Peaceful houseboat cruise through Kerala's serene backwaters with traditional cuisine and Ayurvedic treatments.",
                "Kerala",
                "4 days / 3 nights",
                18000.0,
                4.7,
                &["Nature", "Relaxation", "Cultural"],
                &["Houseboat Stay", "All Meals", "Ayurvedic Massage", "Transfers"],
                &[
                    "https://images.unsplash.com/photo-1602216056096-3b40cc0c9944?w=800",
                    "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=800",
                ],
                true,
            ),
            package(
                3,
                "Rajasthan Desert Safari",
                "Adventure through the Thar Desert with camel rides, cultural performances, and luxury desert camps.",
                "Rajasthan",
                "5 days / 4 nights",
                22000.0,
                4.6,
                &["Adventure", "Cultural", "Desert"],
                &["Desert Camp", "Camel Safari", "Cultural Shows", "All Meals", "Transportation"],
                &[
                    "https://images.unsplash.com/photo-1509142727278-8e1b4bc67de2?w=800",
                    "https://images.unsplash.com/photo-1520673351890-2d4e8b2d0e3e?w=800",
                ],
                false,
            ),
            package(
                4,
                "Goa Beach Paradise",
                "Relax on pristine beaches, enjoy water sports, and experience Goa's vibrant nightlife and Portuguese heritage.",
                "Goa",
                "3 days / 2 nights",
                12000.0,
                4.5,
                &["Beach", "Adventure", "Nightlife"],
                &["Beach Resort", "Water Sports", "Breakfast", "Airport Transfers"],
                &[
                    "https://images.unsplash.com/photo-1512343879784-a960bf40e7f2?w=800",
                    "https://images.unsplash.com/photo-1559827260-dc66d52bef19?w=800",
                ],
                false,
            ),
            package(
                5,
                "Himalayan Adventure",
                "Trekking and mountain adventure in the stunning Himalayas with breathtaking views and cultural experiences.",
                "Himachal Pradesh",
                "7 days / 6 nights",
                30000.0,
                4.9,
                &["Adventure", "Trekking", "Mountains"],
                &["Mountain Lodges", "Trekking Guide", "Equipment", "All Meals", "Permits"],
                &[
                    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800",
                    "https://images.unsplash.com/photo-1544735716-392fe2489ffa?w=800",
                ],
                true,
            ),
        ];

        let booking = |id: Id,
                       user_id: Id,
                       target: Target,
                       stay: Option<((i32, u32, u32), (i32, u32, u32))>,
                       guests: i32,
                       total_price: f64,
                       status: BookingStatus,
                       booked: (i32, u32, u32)| {
            let (check_in, check_out) = match stay {
                Some((from, to)) => (date(from.0, from.1, from.2), date(to.0, to.1, to.2)),
                None => (None, None),
            };
            Booking {
                id,
                user_id,
                target,
                check_in,
                check_out,
                guests,
                total_price,
                status,
                booking_date: date(booked.0, booked.1, booked.2).unwrap_or(now),
                created_at: now,
                updated_at: now,
            }
        };

        let bookings = vec![
            booking(
                1,
                2,
                Target::Hotel(1),
                Some(((2024, 12, 15), (2024, 12, 18))),
                2,
                45000.0,
                BookingStatus::Confirmed,
                (2024, 11, 20),
            ),
            booking(
                2,
                3,
                Target::TripPackage(1),
                None,
                1,
                25000.0,
                BookingStatus::Confirmed,
                (2024, 11, 25),
            ),
            booking(
                3,
                4,
                Target::Hotel(2),
                Some(((2024, 12, 20), (2024, 12, 22))),
                2,
                24000.0,
                BookingStatus::Pending,
                (2024, 12, 1),
            ),
            booking(
                4,
                2,
                Target::TripPackage(2),
                None,
                2,
                36000.0,
                BookingStatus::Completed,
                (2024, 10, 15),
            ),
        ];

        let review = |id: Id,
                      user_id: Id,
                      target: Target,
                      rating: i32,
                      text: &str,
                      stayed: (i32, u32, u32),
                      helpful: i32| Review {
            id,
            user_id,
            target,
            rating,
            review_text: Some(text.into()),
            date_stayed: date(stayed.0, stayed.1, stayed.2),
            helpful,
            verified: true,
            created_at: now,
            updated_at: now,
        };

        let reviews = vec![
            review(
                1,
                2,
                Target::Hotel(1),
                5,
                "Absolutely stunning hotel! The service was impeccable and the location is perfect. The heritage and luxury blend beautifully.",
                (2024, 10, 10),
                15,
            ),
            review(
                2,
                3,
                Target::TripPackage(1),
                5,
                "The Golden Triangle tour exceeded all expectations. Our guide was knowledgeable and the itinerary was perfect.",
                (2024, 9, 15),
                12,
            ),
            review(
                3,
                4,
                Target::Hotel(2),
                4,
                "Great hotel with excellent facilities. The spa was particularly relaxing. Would definitely stay again.",
                (2024, 8, 20),
                8,
            ),
            review(
                4,
                2,
                Target::TripPackage(2),
                5,
                "Kerala backwaters were magical! The houseboat experience was unique and the food was amazing.",
                (2024, 7, 10),
                20,
            ),
            review(
                5,
                3,
                Target::Hotel(3),
                4,
                "Beautiful architecture and great amenities. The breakfast spread was impressive.",
                (2024, 6, 25),
                6,
            ),
        ];

        let document = |id: Id,
                        user_id: Id,
                        file_name: &str,
                        file_type: &str,
                        document_type: &str,
                        uploaded: (i32, u32, u32)| TravelDocument {
            id,
            user_id,
            file_name: file_name.into(),
            file_type: file_type.into(),
            file_path: format!("/documents/{}", file_name),
            document_type: Some(document_type.into()),
            upload_date: date(uploaded.0, uploaded.1, uploaded.2).unwrap_or(now),
            created_at: now,
        };

        let travel_documents = vec![
            document(1, 2, "passport_john_doe.pdf", "application/pdf", "passport", (2024, 11, 1)),
            document(2, 3, "visa_jane_smith.pdf", "application/pdf", "visa", (2024, 11, 5)),
            document(3, 4, "id_travel_guru.jpg", "image/jpeg", "id_card", (2024, 11, 10)),
        ];

        Ok(Self {
            users,
            hotels,
            trip_packages,
            bookings,
            reviews,
            travel_documents,
        })
    }
}

/// Records written by a seeding run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub hotels: usize,
    pub trip_packages: usize,
    pub bookings: usize,
    pub reviews: usize,
    pub travel_documents: usize,
}

fn remap(ids: &HashMap<Id, Id>, kind: &str, id: Id) -> Result<Id> {
    ids.get(&id)
        .copied()
        .ok_or_else(|| StoreError::Internal(format!("fixture {} {} was not seeded", kind, id)))
}

impl Fixtures {
    /// Write the fixture set through `store`, translating fixture identities
    /// into the ones the backend assigns. Returns `None` if the admin account
    /// already exists.
    pub async fn seed_into(self, store: &dyn Storage) -> Result<Option<SeedReport>> {
        if store.get_user_by_username("admin").await?.is_some() {
            return Ok(None);
        }

        let mut report = SeedReport::default();
        let mut users = HashMap::new();
        let mut hotels = HashMap::new();
        let mut packages = HashMap::new();

        for u in self.users {
            let created = store
                .create_user(NewUser {
                    username: u.username,
                    email: u.email,
                    password_hash: u.password_hash,
                    first_name: u.first_name,
                    last_name: u.last_name,
                    phone: u.phone,
                    user_type: u.user_type,
                })
                .await?;
            users.insert(u.id, created.id);
            report.users += 1;
        }

        for h in self.hotels {
            let created = store
                .create_hotel(NewHotel {
                    name: h.name,
                    description: h.description,
                    location: h.location,
                    address: h.address,
                    price_per_night: h.price_per_night,
                    rating: h.rating,
                    amenities: h.amenities,
                    images: h.images,
                    status: h.status,
                })
                .await?;
            hotels.insert(h.id, created.id);
            report.hotels += 1;
        }

        for p in self.trip_packages {
            let created = store
                .create_trip_package(NewTripPackage {
                    name: p.name,
                    description: p.description,
                    location: p.location,
                    duration: p.duration,
                    price: p.price,
                    rating: p.rating,
                    category: p.category,
                    inclusions: p.inclusions,
                    images: p.images,
                    status: p.status,
                    is_recommended: p.is_recommended,
                })
                .await?;
            packages.insert(p.id, created.id);
            report.trip_packages += 1;
        }

        let target = |t: Target| -> Result<Target> {
            Ok(match t {
                Target::Hotel(id) => Target::Hotel(remap(&hotels, "hotel", id)?),
                Target::TripPackage(id) => {
                    Target::TripPackage(remap(&packages, "trip package", id)?)
                }
            })
        };

        for b in self.bookings {
            store
                .create_booking(NewBooking {
                    user_id: remap(&users, "user", b.user_id)?,
                    target: target(b.target)?,
                    check_in: b.check_in,
                    check_out: b.check_out,
                    guests: b.guests,
                    total_price: b.total_price,
                    status: b.status,
                })
                .await?;
            report.bookings += 1;
        }

        // Helpful counts and verification are not carried over; seeded
        // reviews start like any other submission.
        for r in self.reviews {
            store
                .create_review(NewReview {
                    user_id: remap(&users, "user", r.user_id)?,
                    target: target(r.target)?,
                    rating: r.rating,
                    review_text: r.review_text,
                    date_stayed: r.date_stayed,
                })
                .await?;
            report.reviews += 1;
        }

        for d in self.travel_documents {
            store
                .create_travel_document(NewTravelDocument {
                    user_id: remap(&users, "user", d.user_id)?,
                    file_name: d.file_name,
                    file_type: d.file_type,
                    file_path: d.file_path,
                    document_type: d.document_type,
                })
                .await?;
            report.travel_documents += 1;
        }

        Ok(Some(report))
    }
}
