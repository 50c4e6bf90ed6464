//! Port traits (interfaces) for dependency injection

pub mod storage;

pub use storage::{
    BookingStore, HotelStore, ReviewStore, Storage, TravelDocumentStore, TripPackageStore,
    UserStore,
};
