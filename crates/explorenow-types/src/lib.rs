//! ExploreNow Types - Pure type definitions
//!
//! Entities, drafts and patches for the travel catalog, plus the validation
//! rules applied to inbound drafts. Nothing here touches storage or the network.

pub mod booking;
pub mod document;
pub mod listing;
pub mod review;
pub mod target;
pub mod user;
pub mod validate;

pub use booking::*;
pub use document::*;
pub use listing::*;
pub use review::*;
pub use target::*;
pub use user::*;
pub use validate::{Validate, ValidationError};

/// Integer identity shared by every entity kind.
pub type Id = i32;

/// Error returned when parsing a status enum from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
}
