//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The whole content API is one endpoint selected by `?action=`. It is
//! mounted at `/` and `/api` so the site can sit behind a function URL or a
//! path prefix alike.

pub mod actions;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(actions::dispatch).post(actions::dispatch))
        .route("/api", get(actions::dispatch).post(actions::dispatch))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
