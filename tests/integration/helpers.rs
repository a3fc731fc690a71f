//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use screams_api::Application;
use screams_core::config::AppConfig;
use screams_core::traits::DocumentStore;
use screams_core::types::{Collection, Document, Query};

/// Test application context backed by the in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The wired application (store handle, trigger runner)
    pub app: Application,
}

impl TestApp {
    /// Create a new test application with default configuration.
    pub async fn new() -> Self {
        let app = Application::build(AppConfig::default())
            .await
            .expect("Failed to build application");
        let router = app.router();
        Self { router, app }
    }

    /// Run every pending trigger, including triggers fired by triggers.
    pub async fn settle(&self) -> usize {
        self.app
            .runner()
            .expect("triggers enabled")
            .drain_pending()
            .await
    }

    /// Documents in `collection` whose `field` equals `value`.
    pub async fn documents_where(&self, collection: Collection, field: &str, value: &str) -> Vec<Document> {
        self.app
            .state()
            .db
            .query(&Query::new(collection).where_eq(field, value))
            .await
            .expect("query")
    }

    /// Sign up `handle` (email `{handle}@example.com`, password `secret`)
    /// and return a bearer token.
    pub async fn signup(&self, handle: &str) -> String {
        let response = self
            .request(
                "POST",
                "/signup",
                Some(json!({
                    "email": format!("{handle}@example.com"),
                    "password": "secret",
                    "confirmPassword": "secret",
                    "handle": handle,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );
        response.str("token").to_string()
    }

    /// Post a scream and return its id.
    pub async fn create_scream(&self, token: &str, body: &str) -> String {
        let response = self
            .request("POST", "/screams", Some(json!({ "body": body })), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        // Keeps createdAt strictly increasing between consecutive screams.
        tokio::time::sleep(Duration::from_millis(2)).await;
        response.str("screamId").to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// String field of the body; panics when absent.
    pub fn str(&self, field: &str) -> &str {
        self.body
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("no string `{field}` in {:?}", self.body))
    }

    /// Integer field of the body; panics when absent.
    pub fn int(&self, field: &str) -> i64 {
        self.body
            .get(field)
            .and_then(Value::as_i64)
            .unwrap_or_else(|| panic!("no integer `{field}` in {:?}", self.body))
    }
}
