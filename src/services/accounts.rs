//! Username/password accounts.
//!
//! Passwords are stored as an unsalted SHA-256 hex digest. Login failure
//! never says whether the username or the password was wrong.

use std::fmt::Write;

use sha2::{Digest, Sha256};

use super::ServiceError;
use crate::models::{Credentials, User};
use crate::store::ContentStore;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Trim a username; `None` when nothing is left.
#[must_use]
pub fn normalize_username(username: &str) -> Option<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

/// Authenticate `credentials`.
///
/// # Errors
///
/// Returns `InvalidCredentials` for any unknown username/password pair, or a
/// store error.
pub async fn login(store: &dyn ContentStore, credentials: &Credentials) -> Result<User, ServiceError> {
    let username = normalize_username(&credentials.username).ok_or(ServiceError::InvalidCredentials)?;
    store
        .find_user(&username, &hash_password(&credentials.password))
        .await?
        .ok_or(ServiceError::InvalidCredentials)
}

/// Create a non-admin account.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty username or password,
/// `UsernameTaken` for a duplicate, or a store error.
pub async fn register(store: &dyn ContentStore, credentials: &Credentials) -> Result<User, ServiceError> {
    let username = normalize_username(&credentials.username)
        .ok_or_else(|| ServiceError::InvalidInput("username must not be empty".into()))?;
    if credentials.password.is_empty() {
        return Err(ServiceError::InvalidInput("password must not be empty".into()));
    }

    let user = store
        .insert_user(&username, &hash_password(&credentials.password), false)
        .await?;
    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Make sure an admin account with these credentials exists.
///
/// # Errors
///
/// Returns `InvalidInput` for empty credentials, or a store error.
pub async fn ensure_admin(store: &dyn ContentStore, credentials: &Credentials) -> Result<User, ServiceError> {
    let username = normalize_username(&credentials.username)
        .ok_or_else(|| ServiceError::InvalidInput("admin username must not be empty".into()))?;
    if credentials.password.is_empty() {
        return Err(ServiceError::InvalidInput("admin password must not be empty".into()));
    }
    Ok(store
        .upsert_admin(&username, &hash_password(&credentials.password))
        .await?)
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
