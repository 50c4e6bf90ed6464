//! ExploreNow Core Library
//!
//! Storage ports and the error taxonomy shared by every backend.

// Re-export pure types from explorenow-types
pub use explorenow_types::*;

pub mod error;
pub mod ports;

pub use error::{Result, StoreError};
pub use ports::Storage;
