//! Review submission and moderation.
//!
//! Reviews from admins are published immediately; everyone else's wait for
//! approval. The `is_admin` flag is taken from the request as sent.

use super::ServiceError;
use crate::models::{NewReview, Review, rating_in_range};
use crate::store::ContentStore;

/// All reviews, newest first. Visibility filtering happens at the viewer.
///
/// # Errors
///
/// Returns a store error if the read fails.
pub async fn list_reviews(store: &dyn ContentStore) -> Result<Vec<Review>, ServiceError> {
    Ok(store.list_reviews().await?)
}

/// # Errors
///
/// Returns `InvalidRating`/`InvalidInput` for a bad payload, `UnknownUser`
/// when the author does not exist, or a store error.
pub async fn create_review(store: &dyn ContentStore, new_review: &NewReview) -> Result<Review, ServiceError> {
    if !rating_in_range(new_review.rating) {
        return Err(ServiceError::InvalidRating(new_review.rating));
    }
    if new_review.comment.trim().is_empty() {
        return Err(ServiceError::InvalidInput("comment must not be empty".into()));
    }

    let review = store
        .insert_review(new_review.user_id, new_review.rating, &new_review.comment, new_review.is_admin)
        .await?;
    tracing::info!(
        review_id = review.id,
        user_id = new_review.user_id,
        approved = review.is_approved,
        "review created"
    );
    Ok(review)
}

/// # Errors
///
/// Returns `ReviewNotFound` when no review has `id`, or a store error.
pub async fn set_review_approval(store: &dyn ContentStore, id: i64, is_approved: bool) -> Result<(), ServiceError> {
    if !store.set_review_approval(id, is_approved).await? {
        return Err(ServiceError::ReviewNotFound(id));
    }
    tracing::info!(review_id = id, is_approved, "review moderated");
    Ok(())
}

/// # Errors
///
/// Returns `ReviewNotFound` when no review has `id`, or a store error.
pub async fn delete_review(store: &dyn ContentStore, id: i64) -> Result<(), ServiceError> {
    if !store.delete_review(id).await? {
        return Err(ServiceError::ReviewNotFound(id));
    }
    tracing::info!(review_id = id, "review deleted");
    Ok(())
}

#[cfg(test)]
#[path = "reviews_test.rs"]
mod tests;
