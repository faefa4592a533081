//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the content store behind an `Arc<dyn ContentStore>` so the same
//! router serves Postgres in production and fixtures in mock mode.

use std::sync::Arc;

use crate::store::{ContentStore, MemoryStore};

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// State backed by the in-memory fixture store.
    #[must_use]
    pub fn with_fixtures() -> Self {
        Self::new(Arc::new(MemoryStore::with_fixtures()))
    }
}
