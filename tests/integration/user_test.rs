//! Integration tests for sign-up, login and profiles.

mod helpers;

use http::StatusCode;
use serde_json::json;

fn signup_body(email: &str, handle: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": "secret",
        "confirmPassword": "secret",
        "handle": handle,
    })
}

#[tokio::test]
async fn test_signup_validation() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/signup",
            Some(json!({ "email": "nope", "password": "a", "confirmPassword": "b" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str("error"), "VALIDATION");
    assert_eq!(response.body["details"]["email"], "Must be a valid email address");
    assert_eq!(response.body["details"]["confirmPassword"], "Passwords must match");
    assert_eq!(response.body["details"]["handle"], "Must not be empty");
}

#[tokio::test]
async fn test_signup_conflicts() {
    let app = helpers::TestApp::new().await;
    app.signup("alice").await;

    let handle = app
        .request("POST", "/signup", Some(signup_body("other@example.com", "alice")), None)
        .await;
    assert_eq!(handle.status, StatusCode::BAD_REQUEST);
    assert!(handle.body["details"]["handle"].is_string());

    let email = app
        .request("POST", "/signup", Some(signup_body("ALICE@example.com", "alice2")), None)
        .await;
    assert_eq!(email.status, StatusCode::BAD_REQUEST);
    assert!(email.body["details"]["email"].is_string());
}

#[tokio::test]
async fn test_signup_rejects_handle_shadowing_routes() {
    let app = helpers::TestApp::new().await;

    let reserved = app
        .request("POST", "/signup", Some(signup_body("img@example.com", "image")), None)
        .await;
    assert_eq!(reserved.status, StatusCode::BAD_REQUEST);
    assert_eq!(reserved.body["details"]["handle"], "This handle is not available");

    let slash = app
        .request("POST", "/signup", Some(signup_body("slash@example.com", "a/b")), None)
        .await;
    assert_eq!(slash.status, StatusCode::BAD_REQUEST);
    assert!(slash.body["details"]["handle"].is_string());
}

#[tokio::test]
async fn test_login() {
    let app = helpers::TestApp::new().await;
    app.signup("alice").await;

    let ok = app
        .request(
            "POST",
            "/login",
            Some(json!({ "email": "alice@example.com", "password": "secret" })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    let token = ok.str("token").to_string();
    let me = app.request("GET", "/users", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);

    let wrong = app
        .request(
            "POST",
            "/login",
            Some(json!({ "email": "alice@example.com", "password": "guess" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
    assert_eq!(wrong.str("message"), "Wrong credentials, please try again");

    let empty = app
        .request("POST", "/login", Some(json!({ "email": "", "password": "" })), None)
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["details"]["password"], "Must not be empty");
}

#[tokio::test]
async fn test_authenticated_user() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_scream(&alice, "hi").await;
    app.request("GET", &format!("/scream/{id}/like"), None, Some(&bob))
        .await;

    let me = app.request("GET", "/users", None, Some(&bob)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["credentials"]["handle"], "bob");
    assert_eq!(me.body["credentials"]["email"], "bob@example.com");
    assert!(me.body["credentials"]["imageUrl"].is_string());
    let likes = me.body["likes"].as_array().expect("likes");
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0]["screamId"], id.as_str());

    let anonymous = app.request("GET", "/users", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_details_and_public_profile() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;
    app.create_scream(&alice, "older").await;
    app.create_scream(&alice, "newer").await;

    let details = app
        .request(
            "POST",
            "/users",
            Some(json!({ "bio": "  hello  ", "website": "alice.dev", "location": " " })),
            Some(&alice),
        )
        .await;
    assert_eq!(details.status, StatusCode::OK);

    let profile = app.request("GET", "/users/alice", None, None).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["user"]["bio"], "hello");
    assert_eq!(profile.body["user"]["website"], "http://alice.dev");
    assert!(profile.body["user"].get("location").is_none());
    let screams = profile.body["screams"].as_array().expect("screams");
    assert_eq!(screams.len(), 2);
    assert_eq!(screams[0]["body"], "newer");

    let missing = app.request("GET", "/users/ghost", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.str("message"), "User not found");
}

#[tokio::test]
async fn test_image_must_be_url() {
    let app = helpers::TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app
        .request("POST", "/users/image", Some(json!({ "imageUrl": "not a url" })), Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str("error"), "VALIDATION");
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str("status"), "ok");
    assert_eq!(response.str("store"), "memory");
}
