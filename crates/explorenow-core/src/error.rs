//! Error types for ExploreNow storage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend has no live connection.
    #[error("Storage backend is not configured")]
    Unconfigured,

    #[error("Database error: {0}")]
    Database(String),

    /// A unique field (username, email) is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A foreign-key-shaped field points at nothing.
    #[error("Referenced {kind} {id} does not exist")]
    InvalidReference { kind: &'static str, id: i32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// True for failures caused by the caller's data rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::Conflict(_) | StoreError::InvalidReference { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(StoreError::Conflict("username".into()).is_client_error());
        assert!(StoreError::InvalidReference { kind: "user", id: 9 }.is_client_error());
        assert!(!StoreError::Unconfigured.is_client_error());
        assert!(!StoreError::Database("timeout".into()).is_client_error());
    }

    #[test]
    fn test_reference_message() {
        let err = StoreError::InvalidReference { kind: "hotel", id: 42 };
        assert_eq!(err.to_string(), "Referenced hotel 42 does not exist");
    }
}
