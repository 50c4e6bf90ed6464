//! User types

use crate::validate::{non_empty, optional, Validate, ValidationError};
use crate::{Id, ParseStatusError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::User => write!(f, "user"),
            UserType::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserType::User),
            "admin" => Ok(UserType::Admin),
            other => Err(ParseStatusError {
                kind: "user type",
                value: other.to_string(),
            }),
        }
    }
}

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload as sent by the client (plaintext password)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub user_type: UserType,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("username", &self.username)?;
        validate_email(&self.email)?;
        if self.password.chars().count() < 6 {
            return Err(ValidationError::new(
                "password",
                "must be at least 6 characters",
            ));
        }
        Ok(())
    }
}

/// A user ready to be stored; the password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub user_type: UserType,
}

impl NewUser {
    pub fn from_request(req: RegisterRequest, password_hash: String) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            user_type: req.user_type,
        }
    }
}

/// Profile fields a user may change after registration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl Validate for UserPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        optional(&self.email, |email| validate_email(email))
    }
}

impl User {
    pub fn from_new(id: Id, new: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            phone: new.phone,
            user_type: new.user_type,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        self.updated_at = now;
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    non_empty("email", email)?;
    if !email.contains('@') {
        return Err(ValidationError::new("email", "must contain '@'"));
    }
    Ok(())
}
