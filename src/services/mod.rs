//! Domain services used by the action routes and the mock gateway.
//!
//! ARCHITECTURE
//! ============
//! Service functions own validation and business rules over a
//! `ContentStore` so route handlers stay focused on protocol translation,
//! and the in-process mock gateway runs exactly the same rules.

pub mod accounts;
pub mod game;
pub mod reviews;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    InvalidInput(String),
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),
    #[error("username already taken: {0}")]
    UsernameTaken(String),
    #[error("unknown user: {0}")]
    UnknownUser(i64),
    #[error("review not found: {0}")]
    ReviewNotFound(i64),
    #[error("storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken(name) => Self::UsernameTaken(name),
            StoreError::UnknownUser(id) => Self::UnknownUser(id),
            other @ StoreError::Database(_) => Self::Store(other),
        }
    }
}
