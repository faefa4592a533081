use super::*;
use crate::routes;
use crate::state::AppState;
use crate::store::memory::{FIXTURE_ADMIN_PASSWORD, FIXTURE_ADMIN_USERNAME, FIXTURE_PLAYER_PASSWORD, FIXTURE_PLAYER_USERNAME};

/// Serve the fixture-backed router on an ephemeral port and return a gateway
/// pointed at it.
async fn spawn_gateway() -> HttpGateway {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, routes::app(AppState::with_fixtures()))
            .await
            .expect("test server failed");
    });
    HttpGateway::new(format!("http://{addr}/api")).expect("http client should build")
}

fn creds(username: &str, password: &str) -> Credentials {
    Credentials { username: username.into(), password: password.into() }
}

// =============================================================================
// pure helpers
// =============================================================================

#[test]
fn action_url_without_id() {
    assert_eq!(
        action_url("https://fn.example/abc", Action::GetReviews, None),
        "https://fn.example/abc?action=get_reviews"
    );
}

#[test]
fn action_url_with_id() {
    assert_eq!(
        action_url("http://localhost:3000", Action::DeleteReview, Some(12)),
        "http://localhost:3000?action=delete_review&id=12"
    );
}

#[test]
fn action_url_drops_id_for_actions_without_one() {
    assert_eq!(
        action_url("http://h/api", Action::GetReviews, Some(3)),
        "http://h/api?action=get_reviews"
    );
}

#[test]
fn action_url_appends_to_existing_query() {
    assert_eq!(
        action_url("http://h/api?key=1", Action::Login, None),
        "http://h/api?key=1&action=login"
    );
}

#[test]
fn error_message_prefers_error_field() {
    assert_eq!(error_message(r#"{"error":"Invalid credentials"}"#), "Invalid credentials");
    assert_eq!(error_message(r#"{"message":"nope"}"#), "nope");
    assert_eq!(error_message(" plain text \n"), "plain text");
}

#[test]
fn parse_game_info_empty_object_is_none() {
    assert_eq!(parse_game_info("{}").unwrap(), None);
}

#[test]
fn parse_game_info_full_record() {
    let body = r#"{"title":"T","description":"D","cover_url":"C","steam_url":"S","id":1}"#;
    let info = parse_game_info(body).unwrap().unwrap();
    assert_eq!(info.title, "T");
    assert_eq!(info.steam_url, "S");
}

#[test]
fn parse_game_info_garbage_is_decode_error() {
    assert!(matches!(parse_game_info("<html>"), Err(GatewayError::Decode(_))));
}

// =============================================================================
// end to end against the action router
// =============================================================================

#[tokio::test]
async fn fetches_game_info_and_reviews() {
    let gateway = spawn_gateway().await;
    let info = gateway.get_game_info().await.unwrap().expect("fixture game info");
    assert_eq!(info.title, "The Binding of Isaac: Rebirth");

    let reviews = gateway.get_reviews().await.unwrap();
    assert_eq!(reviews.len(), 2);
}

#[tokio::test]
async fn login_failure_maps_to_401_status() {
    let gateway = spawn_gateway().await;
    let err = gateway.login(&creds(FIXTURE_ADMIN_USERNAME, "wrong")).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, GatewayError::Status { message, .. } if message == "Invalid credentials"));
}

#[tokio::test]
async fn register_duplicate_maps_to_409_status() {
    let gateway = spawn_gateway().await;
    let err = gateway
        .register(&creds(FIXTURE_PLAYER_USERNAME, "whatever"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn player_review_is_pending_and_admin_can_approve_and_delete() {
    let gateway = spawn_gateway().await;
    let player = gateway
        .login(&creds(FIXTURE_PLAYER_USERNAME, FIXTURE_PLAYER_PASSWORD))
        .await
        .unwrap();

    let review = gateway
        .create_review(&NewReview { user_id: player.id, rating: 4, comment: "over http".into(), is_admin: false })
        .await
        .unwrap();
    assert!(!review.is_approved);
    assert_eq!(review.username, FIXTURE_PLAYER_USERNAME);

    gateway.update_review(review.id, true).await.unwrap();
    let listed = gateway.get_reviews().await.unwrap();
    assert!(listed.iter().any(|r| r.id == review.id && r.is_approved));

    gateway.delete_review(review.id).await.unwrap();
    let listed = gateway.get_reviews().await.unwrap();
    assert!(listed.iter().all(|r| r.id != review.id));

    let err = gateway.delete_review(review.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn admin_review_is_published_immediately() {
    let gateway = spawn_gateway().await;
    let admin = gateway
        .login(&creds(FIXTURE_ADMIN_USERNAME, FIXTURE_ADMIN_PASSWORD))
        .await
        .unwrap();
    let review = gateway
        .create_review(&NewReview { user_id: admin.id, rating: 5, comment: "official".into(), is_admin: true })
        .await
        .unwrap();
    assert!(review.is_approved);
}

#[tokio::test]
async fn update_game_info_round_trips() {
    let gateway = spawn_gateway().await;
    let info = GameInfo {
        title: "Afterbirth".into(),
        description: "DLC".into(),
        cover_url: "https://c".into(),
        steam_url: "https://s".into(),
    };
    gateway.update_game_info(&info).await.unwrap();
    assert_eq!(gateway.get_game_info().await.unwrap(), Some(info));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = HttpGateway::new(format!("http://{addr}")).unwrap();
    let err = gateway.get_reviews().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}
