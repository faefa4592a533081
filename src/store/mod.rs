//! Content storage behind the action endpoint.
//!
//! ARCHITECTURE
//! ============
//! Services talk to a `ContentStore` trait object so the same business rules
//! run against Postgres in production and against the in-memory fixture
//! store in mock mode and tests.
//!
//! Stores do no validation beyond what the schema enforces; rating bounds,
//! username normalization and password hashing belong to `services`.

pub mod memory;
pub mod postgres;

use crate::models::{GameInfo, Review, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username already taken: {0}")]
    UsernameTaken(String),
    #[error("unknown user: {0}")]
    UnknownUser(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Current game record, if one exists.
    async fn game_info(&self) -> Result<Option<GameInfo>, StoreError>;

    /// Replace the four game fields, creating the record when absent.
    async fn update_game_info(&self, info: &GameInfo) -> Result<(), StoreError>;

    /// All reviews, newest first.
    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError>;

    async fn insert_review(
        &self,
        user_id: i64,
        rating: i32,
        comment: &str,
        is_approved: bool,
    ) -> Result<Review, StoreError>;

    /// Returns false when no review has `id`.
    async fn set_review_approval(&self, id: i64, is_approved: bool) -> Result<bool, StoreError>;

    /// Returns false when no review has `id`.
    async fn delete_review(&self, id: i64) -> Result<bool, StoreError>;

    /// Look up a user by exact username and password digest.
    async fn find_user(&self, username: &str, password_digest: &str) -> Result<Option<User>, StoreError>;

    async fn insert_user(&self, username: &str, password_digest: &str, is_admin: bool) -> Result<User, StoreError>;

    /// Create the account or promote it to admin with the given digest.
    async fn upsert_admin(&self, username: &str, password_digest: &str) -> Result<User, StoreError>;
}
