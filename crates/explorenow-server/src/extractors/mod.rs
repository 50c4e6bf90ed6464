//! Request extractors with JSON error bodies

pub mod json;
pub mod path;

pub use json::ValidJson;
pub use path::PathId;
