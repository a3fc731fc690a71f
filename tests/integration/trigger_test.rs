//! Integration tests for the derived writes performed by triggers.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use screams_core::types::Collection;

async fn notifications_of(app: &helpers::TestApp, token: &str) -> Vec<Value> {
    let me = app.request("GET", "/users", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK, "{:?}", me.body);
    me.body["notifications"].as_array().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_like_notifies_author_once() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "notice me").await;

    app.request("GET", &format!("/scream/{id}/like"), None, Some(&bob))
        .await;
    app.settle().await;

    let notifications = notifications_of(&app, &alice).await;
    assert_eq!(notifications.len(), 1);
    let n = &notifications[0];
    assert_eq!(n["recipient"], "alice");
    assert_eq!(n["sender"], "bob");
    assert_eq!(n["type"], "like");
    assert_eq!(n["read"], false);
    assert_eq!(n["screamId"], id.as_str());
    assert!(notifications_of(&app, &bob).await.is_empty());
}

#[tokio::test]
async fn test_own_like_and_comment_are_silent() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let id = app.create_scream(&alice, "talking to myself").await;

    app.request("GET", &format!("/scream/{id}/like"), None, Some(&alice))
        .await;
    app.request("POST", &format!("/scream/{id}/comment"), Some(json!({ "body": "me" })), Some(&alice))
        .await;
    app.settle().await;

    assert!(notifications_of(&app, &alice).await.is_empty());
}

#[tokio::test]
async fn test_comment_notifies_author() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "thoughts?").await;

    let comment = app
        .request("POST", &format!("/scream/{id}/comment"), Some(json!({ "body": "yes" })), Some(&bob))
        .await;
    app.settle().await;

    let notifications = notifications_of(&app, &alice).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "comment");
    assert_eq!(notifications[0]["notificationId"], comment.str("commentId"));
}

#[tokio::test]
async fn test_unlike_removes_notification() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "fickle").await;

    app.request("GET", &format!("/scream/{id}/like"), None, Some(&bob))
        .await;
    app.settle().await;
    assert_eq!(notifications_of(&app, &alice).await.len(), 1);

    app.request("GET", &format!("/scream/{id}/unlike"), None, Some(&bob))
        .await;
    app.settle().await;
    assert!(notifications_of(&app, &alice).await.is_empty());
}

#[tokio::test]
async fn test_image_change_propagates_to_own_screams() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    app.create_scream(&alice, "one").await;
    app.create_scream(&alice, "two").await;
    app.create_scream(&bob, "three").await;
    app.settle().await;

    let response = app
        .request(
            "POST",
            "/users/image",
            Some(json!({ "imageUrl": "https://img.example/alice.png" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    app.settle().await;

    let own = app.documents_where(Collection::Screams, "userHandle", "alice").await;
    assert_eq!(own.len(), 2);
    for scream in own {
        assert_eq!(scream.get_str("userImage"), Some("https://img.example/alice.png"));
    }
    let others = app.documents_where(Collection::Screams, "userHandle", "bob").await;
    assert_eq!(others.len(), 1);
    for scream in others {
        assert_ne!(scream.get_str("userImage"), Some("https://img.example/alice.png"));
    }

    let later = app.create_scream(&alice, "four").await;
    let scream = app.request("GET", &format!("/scream/{later}"), None, None).await;
    assert_eq!(scream.str("userImage"), "https://img.example/alice.png");
}

#[tokio::test]
async fn test_mark_notifications_read() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "read me").await;

    app.request("GET", &format!("/scream/{id}/like"), None, Some(&bob))
        .await;
    app.settle().await;
    let notification_id = notifications_of(&app, &alice).await[0]["notificationId"]
        .as_str()
        .expect("id")
        .to_string();

    // Bob cannot mark Alice's notification.
    let by_bob = app
        .request("POST", "/notifications", Some(json!([notification_id])), Some(&bob))
        .await;
    assert_eq!(by_bob.status, StatusCode::OK);
    assert_eq!(notifications_of(&app, &alice).await[0]["read"], false);

    let by_alice = app
        .request("POST", "/notifications", Some(json!([notification_id, "ghost"])), Some(&alice))
        .await;
    assert_eq!(by_alice.status, StatusCode::OK);
    assert_eq!(notifications_of(&app, &alice).await[0]["read"], true);
}
