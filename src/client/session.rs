//! Session identity cache.
//!
//! DESIGN
//! ======
//! The cache holds exactly one entry, `user`, inside a small JSON document.
//! There is no expiry and no server-side validation: whatever identity is
//! stored is trusted as-is on the next start.
//!
//! ERROR HANDLING
//! ==============
//! A missing or corrupt cache loads as "nobody logged in" so a damaged file
//! never blocks startup.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use crate::models::User;

pub const SESSION_USER_KEY: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session cache encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<User>;

    /// # Errors
    ///
    /// Returns an error if the cache cannot be written.
    fn save(&self, user: &User) -> Result<(), SessionError>;

    /// # Errors
    ///
    /// Returns an error if the cache cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

// =============================================================================
// FILE
// =============================================================================

/// Cache persisted as a JSON object on disk. Keys other than `user` are
/// preserved across writes.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Map<String, Value> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session cache unreadable");
                return Map::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "session cache is not a JSON object; ignoring");
                Map::new()
            }
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<User> {
        let value = self.read_document().remove(SESSION_USER_KEY)?;
        match serde_json::from_value(value) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "cached session user is malformed; ignoring");
                None
            }
        }
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        let mut document = self.read_document();
        document.insert(SESSION_USER_KEY.to_owned(), serde_json::to_value(user)?);
        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut document = self.read_document();
        if document.remove(SESSION_USER_KEY).is_none() {
            return Ok(());
        }
        self.write_document(&document)
    }
}

// =============================================================================
// MEMORY
// =============================================================================

#[derive(Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<User>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a cached identity.
    #[must_use]
    pub fn with_user(user: User) -> Self {
        Self { user: Mutex::new(Some(user)) }
    }

    /// Poisoned locks are recovered: the slot only ever holds a whole value.
    fn slot(&self) -> MutexGuard<'_, Option<User>> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<User> {
        self.slot().clone()
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        *self.slot() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
