//! Integration tests for liking and unliking screams.

mod helpers;

use http::StatusCode;

use screams_core::types::Collection;

#[tokio::test]
async fn test_like_once() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "like me").await;

    let liked = app
        .request("GET", &format!("/scream/{id}/like"), None, Some(&bob))
        .await;
    assert_eq!(liked.status, StatusCode::OK);
    assert_eq!(liked.int("likeCount"), 1);

    let likes = app.documents_where(Collection::Likes, "screamId", &id).await;
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].get_str("userHandle"), Some("bob"));

    let twice = app
        .request("GET", &format!("/scream/{id}/like"), None, Some(&bob))
        .await;
    assert_eq!(twice.status, StatusCode::BAD_REQUEST);
    assert_eq!(twice.str("message"), "Scream already liked");

    let scream = app.request("GET", &format!("/scream/{id}"), None, None).await;
    assert_eq!(scream.int("likeCount"), 1);
}

#[tokio::test]
async fn test_unlike_restores_count() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let carol = app.signup("carol").await;
    let id = app.create_scream(&alice, "popular").await;

    app.request("GET", &format!("/scream/{id}/like"), None, Some(&carol))
        .await;
    app.request("GET", &format!("/scream/{id}/like"), None, Some(&bob))
        .await;

    let unliked = app
        .request("GET", &format!("/scream/{id}/unlike"), None, Some(&bob))
        .await;
    assert_eq!(unliked.status, StatusCode::OK);
    assert_eq!(unliked.int("likeCount"), 1);

    let remaining = app.documents_where(Collection::Likes, "screamId", &id).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].get_str("userHandle"), Some("carol"));
}

#[tokio::test]
async fn test_unlike_without_like() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let id = app.create_scream(&alice, "lonely").await;

    let response = app
        .request("GET", &format!("/scream/{id}/unlike"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str("message"), "Scream not liked yet");

    let scream = app.request("GET", &format!("/scream/{id}"), None, None).await;
    assert_eq!(scream.int("likeCount"), 0);
}

#[tokio::test]
async fn test_like_unknown_scream() {
    let app = helpers::TestApp::new().await;
    let bob = app.signup("bob").await;

    let like = app.request("GET", "/scream/ghost/like", None, Some(&bob)).await;
    assert_eq!(like.status, StatusCode::NOT_FOUND);
    let unlike = app.request("GET", "/scream/ghost/unlike", None, Some(&bob)).await;
    assert_eq!(unlike.status, StatusCode::NOT_FOUND);

    assert!(app.documents_where(Collection::Likes, "screamId", "ghost").await.is_empty());
}
