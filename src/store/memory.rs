//! In-memory content store.
//!
//! DESIGN
//! ======
//! Backs mock mode and tests. A single `RwLock` guards all tables, so every
//! operation is atomic with respect to the others. `with_fixtures` seeds the
//! same sample content a fresh deployment would show.

use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;

use super::{ContentStore, StoreError};
use crate::models::{GameInfo, Review, User};
use crate::services::accounts::hash_password;

pub const FIXTURE_ADMIN_USERNAME: &str = "admin";
pub const FIXTURE_ADMIN_PASSWORD: &str = "admin";
pub const FIXTURE_PLAYER_USERNAME: &str = "player";
pub const FIXTURE_PLAYER_PASSWORD: &str = "player";

struct UserRecord {
    user: User,
    password_digest: String,
}

struct ReviewRecord {
    id: i64,
    user_id: i64,
    rating: i32,
    comment: String,
    is_approved: bool,
    created_at: OffsetDateTime,
}

#[derive(Default)]
struct Tables {
    game_info: Option<GameInfo>,
    users: Vec<UserRecord>,
    reviews: Vec<ReviewRecord>,
    next_user_id: i64,
    next_review_id: i64,
}

impl Tables {
    fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|r| r.user.id == id).map(|r| &r.user)
    }

    fn add_user(&mut self, username: &str, password_digest: String, is_admin: bool) -> User {
        self.next_user_id += 1;
        let user = User { id: self.next_user_id, username: username.to_owned(), is_admin };
        self.users.push(UserRecord { user: user.clone(), password_digest });
        user
    }

    fn add_review(
        &mut self,
        user_id: i64,
        rating: i32,
        comment: &str,
        is_approved: bool,
        created_at: OffsetDateTime,
    ) -> i64 {
        self.next_review_id += 1;
        self.reviews.push(ReviewRecord {
            id: self.next_review_id,
            user_id,
            rating,
            comment: comment.to_owned(),
            is_approved,
            created_at,
        });
        self.next_review_id
    }

    fn joined(&self, record: &ReviewRecord) -> Review {
        Review {
            id: record.id,
            username: self
                .user(record.user_id)
                .map(|u| u.username.clone())
                .unwrap_or_default(),
            rating: record.rating,
            comment: record.comment.clone(),
            is_approved: record.is_approved,
            created_at: record.created_at,
        }
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store: no game record, no users, no reviews.
    #[must_use]
    pub fn new() -> Self {
        Self { tables: RwLock::new(Tables::default()) }
    }

    /// Store seeded with the game record, an admin, a player, and one
    /// approved plus one pending review.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let mut tables = Tables { game_info: Some(fixture_game_info()), ..Tables::default() };

        tables.add_user(FIXTURE_ADMIN_USERNAME, hash_password(FIXTURE_ADMIN_PASSWORD), true);
        let player = tables.add_user(FIXTURE_PLAYER_USERNAME, hash_password(FIXTURE_PLAYER_PASSWORD), false);

        let now = OffsetDateTime::now_utc();
        tables.add_review(
            player.id,
            5,
            "Hundreds of runs in and every one still feels different.",
            true,
            now - Duration::days(2),
        );
        tables.add_review(player.id, 3, "Great game, but the final bosses are brutal.", false, now - Duration::days(1));

        Self { tables: RwLock::new(tables) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use]
pub fn fixture_game_info() -> GameInfo {
    GameInfo {
        title: "The Binding of Isaac: Rebirth".into(),
        description: "A randomly generated action RPG shooter with heavy rogue-like elements.".into(),
        cover_url: "https://cdn.cloudflare.steamstatic.com/steam/apps/250900/header.jpg".into(),
        steam_url: "https://store.steampowered.com/app/250900/The_Binding_of_Isaac_Rebirth/".into(),
    }
}

#[async_trait::async_trait]
impl ContentStore for MemoryStore {
    async fn game_info(&self) -> Result<Option<GameInfo>, StoreError> {
        Ok(self.tables.read().await.game_info.clone())
    }

    async fn update_game_info(&self, info: &GameInfo) -> Result<(), StoreError> {
        self.tables.write().await.game_info = Some(info.clone());
        Ok(())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<Review> = tables.reviews.iter().map(|r| tables.joined(r)).collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reviews)
    }

    async fn insert_review(
        &self,
        user_id: i64,
        rating: i32,
        comment: &str,
        is_approved: bool,
    ) -> Result<Review, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(username) = tables.user(user_id).map(|u| u.username.clone()) else {
            return Err(StoreError::UnknownUser(user_id));
        };
        let created_at = OffsetDateTime::now_utc();
        let id = tables.add_review(user_id, rating, comment, is_approved, created_at);
        Ok(Review { id, username, rating, comment: comment.to_owned(), is_approved, created_at })
    }

    async fn set_review_approval(&self, id: i64, is_approved: bool) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.reviews.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        record.is_approved = is_approved;
        Ok(true)
    }

    async fn delete_review(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.reviews.len();
        tables.reviews.retain(|r| r.id != id);
        Ok(tables.reviews.len() != before)
    }

    async fn find_user(&self, username: &str, password_digest: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|r| r.user.username == username && r.password_digest == password_digest)
            .map(|r| r.user.clone()))
    }

    async fn insert_user(&self, username: &str, password_digest: &str, is_admin: bool) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|r| r.user.username == username) {
            return Err(StoreError::UsernameTaken(username.to_owned()));
        }
        Ok(tables.add_user(username, password_digest.to_owned(), is_admin))
    }

    async fn upsert_admin(&self, username: &str, password_digest: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(record) = tables.users.iter_mut().find(|r| r.user.username == username) {
            record.user.is_admin = true;
            password_digest.clone_into(&mut record.password_digest);
            return Ok(record.user.clone());
        }
        Ok(tables.add_user(username, password_digest.to_owned(), true))
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
