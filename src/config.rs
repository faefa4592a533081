//! Configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` through `dotenvy` first, then builds `AppConfig`.
//! Client-side callers build `ClientConfig` to pick a gateway and the session
//! cache location.

use std::path::PathBuf;

use crate::models::Credentials;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SESSION_PATH: &str = ".fansite-session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("{0} and {1} must be set together")]
    Incomplete(&'static str, &'static str),
}

// =============================================================================
// SERVER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` runs the server on the in-memory fixture store.
    pub database_url: Option<String>,
    pub port: u16,
    pub db_max_connections: u32,
    /// Admin account ensured at startup.
    pub admin: Option<Credentials>,
}

impl AppConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `DATABASE_URL`: Postgres URL; absent selects the fixture store
    /// - `PORT`: default 3000
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `ADMIN_USERNAME` + `ADMIN_PASSWORD`: both or neither
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable numbers or a half-configured admin.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS)?;

        let admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::Incomplete("ADMIN_USERNAME", "ADMIN_PASSWORD")),
        };

        Ok(Self { database_url, port, db_max_connections, admin })
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { var, value }),
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Action endpoint base URL; `None` selects the mock gateway.
    pub api_url: Option<String>,
    pub session_path: PathBuf,
}

impl ClientConfig {
    /// Build client config from `FANSITE_API_URL` and `FANSITE_SESSION_PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("FANSITE_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty());
        let session_path = lookup("FANSITE_SESSION_PATH")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH), PathBuf::from);
        Self { api_url, session_path }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
