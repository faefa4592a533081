//! Content gateway: the controller's only route to game data and reviews.
//!
//! Every operation is a single request/response with no retries,
//! idempotency keys or batching.

use crate::models::{Credentials, GameInfo, NewReview, Review, User};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl GatewayError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

#[async_trait::async_trait]
pub trait ContentGateway: Send + Sync {
    /// `None` when the site has no game record yet.
    async fn get_game_info(&self) -> Result<Option<GameInfo>, GatewayError>;

    /// Every review, newest first, regardless of approval.
    async fn get_reviews(&self) -> Result<Vec<Review>, GatewayError>;

    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError>;

    async fn register(&self, credentials: &Credentials) -> Result<User, GatewayError>;

    async fn create_review(&self, new_review: &NewReview) -> Result<Review, GatewayError>;

    async fn update_review(&self, id: i64, is_approved: bool) -> Result<(), GatewayError>;

    async fn delete_review(&self, id: i64) -> Result<(), GatewayError>;

    async fn update_game_info(&self, info: &GameInfo) -> Result<(), GatewayError>;
}

/// Lets a controller hold whichever gateway configuration picked at runtime.
#[async_trait::async_trait]
impl ContentGateway for Box<dyn ContentGateway> {
    async fn get_game_info(&self) -> Result<Option<GameInfo>, GatewayError> {
        self.as_ref().get_game_info().await
    }

    async fn get_reviews(&self) -> Result<Vec<Review>, GatewayError> {
        self.as_ref().get_reviews().await
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        self.as_ref().login(credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        self.as_ref().register(credentials).await
    }

    async fn create_review(&self, new_review: &NewReview) -> Result<Review, GatewayError> {
        self.as_ref().create_review(new_review).await
    }

    async fn update_review(&self, id: i64, is_approved: bool) -> Result<(), GatewayError> {
        self.as_ref().update_review(id, is_approved).await
    }

    async fn delete_review(&self, id: i64) -> Result<(), GatewayError> {
        self.as_ref().delete_review(id).await
    }

    async fn update_game_info(&self, info: &GameInfo) -> Result<(), GatewayError> {
        self.as_ref().update_game_info(info).await
    }
}
