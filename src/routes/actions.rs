//! `?action=` dispatch: translates HTTP requests into service calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure answers with a JSON `{"error": ...}` body. Storage failures
//! are logged here and reported to the caller without details.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::action::Action;
use crate::models::{Credentials, GameInfo, NewReview, Review, ReviewUpdate};
use crate::services::{ServiceError, accounts, game, reviews};
use crate::state::AppState;
use crate::store::ContentStore;

#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    #[serde(default)]
    pub action: String,
    pub id: Option<String>,
}

/// `create_review` success body: the stored review plus a message.
#[derive(Serialize)]
struct CreatedReview {
    #[serde(flatten)]
    review: Review,
    message: &'static str,
}

#[derive(Debug, thiserror::Error)]
enum ActionError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub(crate) fn service_error_to_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ServiceError::InvalidInput(_) | ServiceError::InvalidRating(_) => StatusCode::BAD_REQUEST,
        ServiceError::UsernameTaken(_) => StatusCode::CONFLICT,
        ServiceError::UnknownUser(_) | ServiceError::ReviewNotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"{}" } else { body };
    serde_json::from_slice(raw).map_err(|e| format!("invalid request body: {e}"))
}

pub(crate) fn parse_review_id(raw: Option<&str>) -> Result<i64, String> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or("missing review id")?;
    raw.parse::<i64>().map_err(|_| format!("invalid review id: {raw:?}"))
}

/// `GET|POST ?action=...`: run one content action.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<ActionQuery>,
    body: Bytes,
) -> Response {
    let Some(action) = Action::parse(&query.action) else {
        return Json(json!({ "message": "API ready", "method": method.as_str(), "action": query.action }))
            .into_response();
    };

    match run(action, state.store.as_ref(), query.id.as_deref(), &body).await {
        Ok(response) => response,
        Err(ActionError::BadRequest(msg)) => error_response(StatusCode::BAD_REQUEST, &msg),
        Err(ActionError::Service(err)) => {
            let status = service_error_to_status(&err);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(%action, error = %err, "action failed");
                return error_response(status, "internal error");
            }
            tracing::debug!(%action, error = %err, "action rejected");
            error_response(status, &err.to_string())
        }
    }
}

async fn run(action: Action, store: &dyn ContentStore, id: Option<&str>, body: &[u8]) -> Result<Response, ActionError> {
    let response = match action {
        Action::GetGameInfo => match game::get_game_info(store).await? {
            Some(info) => Json(info).into_response(),
            None => Json(json!({})).into_response(),
        },
        Action::GetReviews => Json(reviews::list_reviews(store).await?).into_response(),
        Action::Login => {
            let credentials: Credentials = parse_body(body).map_err(ActionError::BadRequest)?;
            Json(accounts::login(store, &credentials).await?).into_response()
        }
        Action::Register => {
            let credentials: Credentials = parse_body(body).map_err(ActionError::BadRequest)?;
            (StatusCode::CREATED, Json(accounts::register(store, &credentials).await?)).into_response()
        }
        Action::CreateReview => {
            let new_review: NewReview = parse_body(body).map_err(ActionError::BadRequest)?;
            let review = reviews::create_review(store, &new_review).await?;
            (StatusCode::CREATED, Json(CreatedReview { review, message: "Review created" })).into_response()
        }
        Action::UpdateReview => {
            let id = parse_review_id(id).map_err(ActionError::BadRequest)?;
            let update: ReviewUpdate = parse_body(body).map_err(ActionError::BadRequest)?;
            reviews::set_review_approval(store, id, update.is_approved).await?;
            message(StatusCode::OK, "Review updated")
        }
        Action::DeleteReview => {
            let id = parse_review_id(id).map_err(ActionError::BadRequest)?;
            reviews::delete_review(store, id).await?;
            message(StatusCode::OK, "Review deleted")
        }
        Action::UpdateGameInfo => {
            let info: GameInfo = parse_body(body).map_err(ActionError::BadRequest)?;
            game::update_game_info(store, &info).await?;
            message(StatusCode::OK, "Game info updated")
        }
    };
    Ok(response)
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
