//! HTTP gateway against the `?action=` endpoint.
//!
//! Thin `reqwest` wrapper. Response handling is split into pure helpers
//! (`action_url`, `error_message`) for testability.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::gateway::{ContentGateway, GatewayError};
use crate::action::Action;
use crate::models::{Credentials, GameInfo, NewReview, Review, ReviewUpdate, User};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, action: Action) -> Result<Response, GatewayError> {
        let response = self
            .http
            .get(action_url(&self.base_url, action, None))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        check_status(response).await
    }

    async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        action: Action,
        id: Option<i64>,
        body: Option<&B>,
    ) -> Result<Response, GatewayError> {
        let mut request = self.http.post(action_url(&self.base_url, action, id));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        check_status(response).await
    }
}

/// Build `{base}?action={name}` plus `&id={id}` when addressing a review.
/// Actions that take no id ignore `id`.
#[must_use]
pub fn action_url(base_url: &str, action: Action, id: Option<i64>) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    match id.filter(|_| action.takes_review_id()) {
        Some(id) => format!("{base_url}{separator}action={action}&id={id}"),
        None => format!("{base_url}{separator}action={action}"),
    }
}

/// Pull the `error` (or `message`) field from a failure body, falling back
/// to the raw text.
#[must_use]
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_owned())
}

async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status { status: status.as_u16(), message: error_message(&body) })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let text = response
        .text()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// `get_game_info` answers `{}` when no record exists.
pub(crate) fn parse_game_info(body: &str) -> Result<Option<GameInfo>, GatewayError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    if value.get("title").is_none() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl ContentGateway for HttpGateway {
    async fn get_game_info(&self) -> Result<Option<GameInfo>, GatewayError> {
        let response = self.get(Action::GetGameInfo).await?;
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        parse_game_info(&text)
    }

    async fn get_reviews(&self) -> Result<Vec<Review>, GatewayError> {
        decode(self.get(Action::GetReviews).await?).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        decode(self.post(Action::Login, None, Some(credentials)).await?).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        decode(self.post(Action::Register, None, Some(credentials)).await?).await
    }

    async fn create_review(&self, new_review: &NewReview) -> Result<Review, GatewayError> {
        decode(self.post(Action::CreateReview, None, Some(new_review)).await?).await
    }

    async fn update_review(&self, id: i64, is_approved: bool) -> Result<(), GatewayError> {
        self.post(Action::UpdateReview, Some(id), Some(&ReviewUpdate { is_approved }))
            .await?;
        Ok(())
    }

    async fn delete_review(&self, id: i64) -> Result<(), GatewayError> {
        self.post::<()>(Action::DeleteReview, Some(id), None).await?;
        Ok(())
    }

    async fn update_game_info(&self, info: &GameInfo) -> Result<(), GatewayError> {
        self.post(Action::UpdateGameInfo, None, Some(info)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
