use super::*;
use crate::store::MemoryStore;
use crate::store::memory::{FIXTURE_ADMIN_PASSWORD, FIXTURE_ADMIN_USERNAME};

fn creds(username: &str, password: &str) -> Credentials {
    Credentials { username: username.into(), password: password.into() }
}

// =============================================================================
// hashing
// =============================================================================

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a, 0xff]), "0aff");
}

#[test]
fn hash_password_is_sha256_hex() {
    assert_eq!(
        hash_password("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn normalize_username_trims() {
    assert_eq!(normalize_username("  lazarus "), Some("lazarus".into()));
    assert_eq!(normalize_username("   "), None);
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_fixture_admin() {
    let store = MemoryStore::with_fixtures();
    let user = login(&store, &creds(FIXTURE_ADMIN_USERNAME, FIXTURE_ADMIN_PASSWORD))
        .await
        .unwrap();
    assert!(user.is_admin);
}

#[tokio::test]
async fn login_wrong_password_is_invalid_credentials() {
    let store = MemoryStore::with_fixtures();
    let err = login(&store, &creds(FIXTURE_ADMIN_USERNAME, "nope")).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidCredentials));
}

#[tokio::test]
async fn login_unknown_user_is_invalid_credentials() {
    let store = MemoryStore::with_fixtures();
    let err = login(&store, &creds("apollyon", "x")).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidCredentials));
}

// =============================================================================
// register
// =============================================================================

#[tokio::test]
async fn register_creates_non_admin_and_allows_login() {
    let store = MemoryStore::new();
    let user = register(&store, &creds(" keeper ", "coins")).await.unwrap();
    assert_eq!(user.username, "keeper");
    assert!(!user.is_admin);

    let again = login(&store, &creds("keeper", "coins")).await.unwrap();
    assert_eq!(again, user);
}

#[tokio::test]
async fn register_rejects_empty_fields() {
    let store = MemoryStore::new();
    assert!(matches!(
        register(&store, &creds("", "pw")).await.unwrap_err(),
        ServiceError::InvalidInput(_)
    ));
    assert!(matches!(
        register(&store, &creds("bethany", "")).await.unwrap_err(),
        ServiceError::InvalidInput(_)
    ));
}

#[tokio::test]
async fn register_duplicate_is_username_taken() {
    let store = MemoryStore::with_fixtures();
    let err = register(&store, &creds(FIXTURE_ADMIN_USERNAME, "pw")).await.unwrap_err();
    assert!(matches!(err, ServiceError::UsernameTaken(_)));
}

// =============================================================================
// ensure_admin
// =============================================================================

#[tokio::test]
async fn ensure_admin_creates_login_capable_admin() {
    let store = MemoryStore::new();
    ensure_admin(&store, &creds("mom", "heart")).await.unwrap();
    let user = login(&store, &creds("mom", "heart")).await.unwrap();
    assert!(user.is_admin);
}
