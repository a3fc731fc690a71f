//! Integration tests for posting, reading, commenting on and deleting screams.

mod helpers;

use http::StatusCode;
use serde_json::json;

use screams_core::types::Collection;

#[tokio::test]
async fn test_blank_body_is_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.signup("alice").await;

    let response = app
        .request("POST", "/screams", Some(json!({ "body": "   " })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["body"], "Body must not be empty");

    let list = app.request("GET", "/screams", None, None).await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn test_create_requires_auth() {
    let app = helpers::TestApp::new().await;

    let missing = app
        .request("POST", "/screams", Some(json!({ "body": "hi" })), None)
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "UNAUTHORIZED");

    let garbage = app
        .request("POST", "/screams", Some(json!({ "body": "hi" })), Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_newest_first() {
    let app = helpers::TestApp::new().await;
    let token = app.signup("alice").await;

    let first = app.create_scream(&token, "first").await;
    let second = app.create_scream(&token, "second").await;

    let list = app.request("GET", "/screams", None, None).await;
    assert_eq!(list.status, StatusCode::OK);
    let screams = list.body.as_array().expect("array");
    assert_eq!(screams.len(), 2);
    assert_eq!(screams[0]["screamId"], second.as_str());
    assert_eq!(screams[1]["screamId"], first.as_str());
    assert_eq!(screams[0]["userHandle"], "alice");
    assert_eq!(screams[0]["likeCount"], 0);
    assert_eq!(screams[0]["commentCount"], 0);
}

#[tokio::test]
async fn test_get_unknown_scream() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/scream/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Scream not found");
}

#[tokio::test]
async fn test_comment_flow() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "hello").await;

    let empty = app
        .request("POST", &format!("/scream/{id}/comment"), Some(json!({ "body": "" })), Some(&bob))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let missing = app
        .request("POST", "/scream/ghost/comment", Some(json!({ "body": "hey" })), Some(&bob))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let comment = app
        .request("POST", &format!("/scream/{id}/comment"), Some(json!({ "body": "nice" })), Some(&bob))
        .await;
    assert_eq!(comment.status, StatusCode::OK);
    assert_eq!(comment.str("screamId"), id);
    assert_eq!(comment.str("userHandle"), "bob");

    let scream = app.request("GET", &format!("/scream/{id}"), None, None).await;
    assert_eq!(scream.status, StatusCode::OK);
    assert_eq!(scream.int("commentCount"), 1);
    let comments = scream.body["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["body"], "nice");
}

#[tokio::test]
async fn test_only_author_can_delete() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "mine").await;

    let forbidden = app
        .request("DELETE", &format!("/scream/{id}"), None, Some(&bob))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    let still_there = app.request("GET", &format!("/scream/{id}"), None, None).await;
    assert_eq!(still_there.status, StatusCode::OK);

    let deleted = app
        .request("DELETE", &format!("/scream/{id}"), None, Some(&alice))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.str("message"), "Scream deleted successfully");

    let gone = app.request("GET", &format!("/scream/{id}"), None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = app
        .request("DELETE", &format!("/scream/{id}"), None, Some(&alice))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_cascades_to_dependents() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "doomed").await;

    app.request("GET", &format!("/scream/{id}/like"), None, Some(&bob))
        .await;
    app.request("POST", &format!("/scream/{id}/comment"), Some(json!({ "body": "rip" })), Some(&bob))
        .await;
    app.settle().await;
    assert_eq!(app.documents_where(Collection::Notifications, "screamId", &id).await.len(), 2);

    let deleted = app
        .request("DELETE", &format!("/scream/{id}"), None, Some(&alice))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    app.settle().await;

    for collection in [Collection::Comments, Collection::Likes, Collection::Notifications] {
        assert!(
            app.documents_where(collection, "screamId", &id).await.is_empty(),
            "{collection} still references the deleted scream"
        );
    }
}
