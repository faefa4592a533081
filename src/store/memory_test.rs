use super::*;

// =============================================================================
// fixtures
// =============================================================================

#[tokio::test]
async fn fixtures_seed_game_info() {
    let store = MemoryStore::with_fixtures();
    let info = store.game_info().await.unwrap().expect("fixture game info");
    assert_eq!(info, fixture_game_info());
}

#[tokio::test]
async fn fixtures_seed_one_pending_and_one_approved_review() {
    let store = MemoryStore::with_fixtures();
    let reviews = store.list_reviews().await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews.iter().filter(|r| r.is_approved).count(), 1);
    assert!(reviews.iter().all(|r| r.username == FIXTURE_PLAYER_USERNAME));
}

#[tokio::test]
async fn fixture_admin_can_be_found_by_digest() {
    let store = MemoryStore::with_fixtures();
    let admin = store
        .find_user(FIXTURE_ADMIN_USERNAME, &hash_password(FIXTURE_ADMIN_PASSWORD))
        .await
        .unwrap()
        .expect("admin fixture");
    assert!(admin.is_admin);
}

#[tokio::test]
async fn empty_store_has_no_game_info() {
    let store = MemoryStore::new();
    assert!(store.game_info().await.unwrap().is_none());
}

// =============================================================================
// reviews
// =============================================================================

#[tokio::test]
async fn list_reviews_newest_first() {
    let store = MemoryStore::new();
    let user = store.insert_user("lost", "digest", false).await.unwrap();
    let first = store.insert_review(user.id, 2, "first", false).await.unwrap();
    let second = store.insert_review(user.id, 4, "second", true).await.unwrap();

    let ids: Vec<i64> = store.list_reviews().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn insert_review_for_unknown_user_fails() {
    let store = MemoryStore::new();
    let err = store.insert_review(99, 5, "ghost", false).await.unwrap_err();
    assert!(matches!(err, StoreError::UnknownUser(99)));
}

#[tokio::test]
async fn insert_review_joins_username() {
    let store = MemoryStore::new();
    let user = store.insert_user("azazel", "digest", false).await.unwrap();
    let review = store.insert_review(user.id, 4, "brimstone", false).await.unwrap();
    assert_eq!(review.username, "azazel");
    assert_eq!(review.comment, "brimstone");
    assert!(!review.is_approved);
}

#[tokio::test]
async fn set_review_approval_reports_missing() {
    let store = MemoryStore::with_fixtures();
    assert!(!store.set_review_approval(4242, true).await.unwrap());
}

#[tokio::test]
async fn set_review_approval_flips_flag() {
    let store = MemoryStore::with_fixtures();
    let pending = store
        .list_reviews()
        .await
        .unwrap()
        .into_iter()
        .find(|r| !r.is_approved)
        .expect("pending fixture");
    assert!(store.set_review_approval(pending.id, true).await.unwrap());
    assert!(store.list_reviews().await.unwrap().iter().all(|r| r.is_approved));
}

#[tokio::test]
async fn delete_review_removes_row() {
    let store = MemoryStore::with_fixtures();
    let target = store.list_reviews().await.unwrap()[0].id;
    assert!(store.delete_review(target).await.unwrap());
    assert!(!store.delete_review(target).await.unwrap());
    assert!(store.list_reviews().await.unwrap().iter().all(|r| r.id != target));
}

// =============================================================================
// users
// =============================================================================

#[tokio::test]
async fn insert_user_rejects_duplicate_username() {
    let store = MemoryStore::new();
    store.insert_user("cain", "a", false).await.unwrap();
    let err = store.insert_user("cain", "b", false).await.unwrap_err();
    assert!(matches!(err, StoreError::UsernameTaken(name) if name == "cain"));
}

#[tokio::test]
async fn find_user_requires_matching_digest() {
    let store = MemoryStore::new();
    store.insert_user("judas", "right", false).await.unwrap();
    assert!(store.find_user("judas", "wrong").await.unwrap().is_none());
    assert!(store.find_user("judas", "right").await.unwrap().is_some());
}

#[tokio::test]
async fn upsert_admin_promotes_existing_user() {
    let store = MemoryStore::new();
    let user = store.insert_user("eve", "old", false).await.unwrap();
    let admin = store.upsert_admin("eve", "new").await.unwrap();
    assert_eq!(admin.id, user.id);
    assert!(admin.is_admin);
    assert!(store.find_user("eve", "new").await.unwrap().is_some());
    assert!(store.find_user("eve", "old").await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_admin_creates_missing_user() {
    let store = MemoryStore::new();
    let admin = store.upsert_admin("samson", "digest").await.unwrap();
    assert!(admin.is_admin);
    assert_eq!(admin.username, "samson");
}
