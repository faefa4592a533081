//! Shared data model for the server, the gateways and the controller.
//!
//! DESIGN
//! ======
//! These types are the JSON wire shapes of the action endpoint. Store-only
//! data (password digests, row timestamps other than `created_at`) never
//! appears here.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

// =============================================================================
// USER
// =============================================================================

/// Authenticated identity as returned by login/registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

// =============================================================================
// REVIEW
// =============================================================================

/// A star-rated review joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub username: String,
    pub rating: i32,
    pub comment: String,
    pub is_approved: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Review {
    /// Whether `viewer` may see this review. Admins see everything; everyone
    /// else only sees approved reviews.
    #[must_use]
    pub fn visible_to(&self, viewer: Option<&User>) -> bool {
        self.is_approved || viewer.is_some_and(|u| u.is_admin)
    }
}

/// Filter `reviews` down to the ones `viewer` may see, preserving order.
#[must_use]
pub fn visible_reviews<'a>(reviews: &'a [Review], viewer: Option<&User>) -> Vec<&'a Review> {
    reviews.iter().filter(|r| r.visible_to(viewer)).collect()
}

/// Returns true if `rating` is a valid star count.
#[must_use]
pub fn rating_in_range(rating: i32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Review submission payload (`create_review` body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub user_id: i64,
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Moderation payload (`update_review` body).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub is_approved: bool,
}

// =============================================================================
// GAME INFO
// =============================================================================

/// Singleton game metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub title: String,
    pub description: String,
    pub cover_url: String,
    pub steam_url: String,
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Login/registration payload. Missing fields read as empty strings.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
