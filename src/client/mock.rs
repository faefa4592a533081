//! In-process gateway over fixture data.
//!
//! Runs the same service functions as the server against a `MemoryStore`,
//! so mock mode enforces the same validation without any network.

use std::sync::Arc;

use super::gateway::{ContentGateway, GatewayError};
use crate::models::{Credentials, GameInfo, NewReview, Review, User};
use crate::routes::actions::service_error_to_status;
use crate::services::{ServiceError, accounts, game, reviews};
use crate::store::{ContentStore, MemoryStore};

pub struct MockGateway {
    store: Arc<dyn ContentStore>,
}

impl MockGateway {
    /// Gateway over the standard fixture set.
    #[must_use]
    pub fn with_fixtures() -> Self {
        Self::new(Arc::new(MemoryStore::with_fixtures()))
    }

    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }
}

/// Same status/message pairing the HTTP endpoint would produce.
impl From<ServiceError> for GatewayError {
    fn from(err: ServiceError) -> Self {
        let status = service_error_to_status(&err).as_u16();
        Self::Status { status, message: err.to_string() }
    }
}

#[async_trait::async_trait]
impl ContentGateway for MockGateway {
    async fn get_game_info(&self) -> Result<Option<GameInfo>, GatewayError> {
        Ok(game::get_game_info(self.store.as_ref()).await?)
    }

    async fn get_reviews(&self) -> Result<Vec<Review>, GatewayError> {
        Ok(reviews::list_reviews(self.store.as_ref()).await?)
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        Ok(accounts::login(self.store.as_ref(), credentials).await?)
    }

    async fn register(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        Ok(accounts::register(self.store.as_ref(), credentials).await?)
    }

    async fn create_review(&self, new_review: &NewReview) -> Result<Review, GatewayError> {
        Ok(reviews::create_review(self.store.as_ref(), new_review).await?)
    }

    async fn update_review(&self, id: i64, is_approved: bool) -> Result<(), GatewayError> {
        Ok(reviews::set_review_approval(self.store.as_ref(), id, is_approved).await?)
    }

    async fn delete_review(&self, id: i64) -> Result<(), GatewayError> {
        Ok(reviews::delete_review(self.store.as_ref(), id).await?)
    }

    async fn update_game_info(&self, info: &GameInfo) -> Result<(), GatewayError> {
        Ok(game::update_game_info(self.store.as_ref(), info).await?)
    }
}
