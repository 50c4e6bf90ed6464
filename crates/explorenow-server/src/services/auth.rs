//! Authentication service

use anyhow::Result;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use explorenow_core::{NewUser, RegisterRequest, Storage, StoreError, User};
use rand::rngs::OsRng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Hash a plaintext password into a PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC string.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown account or wrong password; deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Hashing(String),
}

/// How the client identifies itself at login
#[derive(Debug, Clone)]
pub enum LoginIdentifier {
    Email(String),
    Username(String),
}

pub struct AuthService {
    store: Arc<dyn Storage>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<User, AuthError> {
        let password_hash =
            hash_password(&req.password).map_err(|e| AuthError::Hashing(format!("{:#}", e)))?;
        let user = self
            .store
            .create_user(NewUser::from_request(req, password_hash))
            .await?;

        info!("Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    pub async fn login(
        &self,
        identifier: &LoginIdentifier,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = match identifier {
            LoginIdentifier::Email(email) => self.store.get_user_by_email(email).await?,
            LoginIdentifier::Username(username) => {
                self.store.get_user_by_username(username).await?
            }
        };

        match user {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            _ => {
                debug!("Rejected login for {:?}", identifier);
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
