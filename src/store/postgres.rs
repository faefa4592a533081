//! `PostgreSQL`-backed content store.

use sqlx::{PgPool, Row};
use time::OffsetDateTime;

use super::{ContentStore, StoreError};
use crate::models::{GameInfo, Review, User};

const GAME_INFO_ROW_ID: i64 = 1;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type ReviewTuple = (i64, String, i32, String, bool, OffsetDateTime);

fn review_from_tuple((id, username, rating, comment, is_approved, created_at): ReviewTuple) -> Review {
    Review { id, username, rating, comment, is_approved, created_at }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait::async_trait]
impl ContentStore for PgStore {
    async fn game_info(&self) -> Result<Option<GameInfo>, StoreError> {
        let row = sqlx::query(
            "SELECT title, description, cover_url, steam_url
             FROM game_info
             ORDER BY id DESC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| GameInfo {
            title: r.get("title"),
            description: r.get("description"),
            cover_url: r.get("cover_url"),
            steam_url: r.get("steam_url"),
        }))
    }

    async fn update_game_info(&self, info: &GameInfo) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO game_info (id, title, description, cover_url, steam_url)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                 title = EXCLUDED.title,
                 description = EXCLUDED.description,
                 cover_url = EXCLUDED.cover_url,
                 steam_url = EXCLUDED.steam_url,
                 updated_at = now()",
        )
        .bind(GAME_INFO_ROW_ID)
        .bind(&info.title)
        .bind(&info.description)
        .bind(&info.cover_url)
        .bind(&info.steam_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        let rows = sqlx::query_as::<_, ReviewTuple>(
            "SELECT r.id, u.username, r.rating, r.comment, r.is_approved, r.created_at
             FROM reviews r
             JOIN users u ON r.user_id = u.id
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(review_from_tuple).collect())
    }

    async fn insert_review(
        &self,
        user_id: i64,
        rating: i32,
        comment: &str,
        is_approved: bool,
    ) -> Result<Review, StoreError> {
        let row = sqlx::query_as::<_, ReviewTuple>(
            "WITH inserted AS (
                 INSERT INTO reviews (user_id, rating, comment, is_approved)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, user_id, rating, comment, is_approved, created_at
             )
             SELECT i.id, u.username, i.rating, i.comment, i.is_approved, i.created_at
             FROM inserted i
             JOIN users u ON u.id = i.user_id",
        )
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .bind(is_approved)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) { StoreError::UnknownUser(user_id) } else { StoreError::Database(e) }
        })?;

        Ok(review_from_tuple(row))
    }

    async fn set_review_approval(&self, id: i64, is_approved: bool) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE reviews SET is_approved = $1 WHERE id = $2")
            .bind(is_approved)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_review(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_user(&self, username: &str, password_digest: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, (i64, String, bool)>(
            "SELECT id, username, is_admin FROM users
             WHERE username = $1 AND password_digest = $2",
        )
        .bind(username)
        .bind(password_digest)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, username, is_admin)| User { id, username, is_admin }))
    }

    async fn insert_user(&self, username: &str, password_digest: &str, is_admin: bool) -> Result<User, StoreError> {
        let (id, username, is_admin) = sqlx::query_as::<_, (i64, String, bool)>(
            "INSERT INTO users (username, password_digest, is_admin)
             VALUES ($1, $2, $3)
             RETURNING id, username, is_admin",
        )
        .bind(username)
        .bind(password_digest)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) { StoreError::UsernameTaken(username.to_owned()) } else { StoreError::Database(e) }
        })?;

        Ok(User { id, username, is_admin })
    }

    async fn upsert_admin(&self, username: &str, password_digest: &str) -> Result<User, StoreError> {
        let (id, username, is_admin) = sqlx::query_as::<_, (i64, String, bool)>(
            "INSERT INTO users (username, password_digest, is_admin)
             VALUES ($1, $2, true)
             ON CONFLICT (username) DO UPDATE SET
                 password_digest = EXCLUDED.password_digest,
                 is_admin = true
             RETURNING id, username, is_admin",
        )
        .bind(username)
        .bind(password_digest)
        .fetch_one(&self.pool)
        .await?;

        Ok(User { id, username, is_admin })
    }
}

#[cfg(all(test, feature = "live-db-tests"))]
#[path = "postgres_test.rs"]
mod tests;
