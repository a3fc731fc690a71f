//! Route definitions for the Screams HTTP API.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with every route and the request-logging
/// middleware, threading `AppState` through via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(scream_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(notification_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Screams, comments and likes
fn scream_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/screams",
            get(handlers::scream::list_screams).post(handlers::scream::create_scream),
        )
        .route(
            "/scream/{id}",
            get(handlers::scream::get_scream).delete(handlers::scream::delete_scream),
        )
        .route("/scream/{id}/like", get(handlers::scream::like_scream))
        .route("/scream/{id}/unlike", get(handlers::scream::unlike_scream))
        .route("/scream/{id}/comment", post(handlers::scream::comment_on_scream))
}

/// Sign-up and login
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::user::signup))
        .route("/login", post(handlers::user::login))
}

/// Profiles
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::authenticated_user).post(handlers::user::add_details),
        )
        .route("/users/image", post(handlers::user::set_image))
        .route("/users/{handle}", get(handlers::user::user_details))
}

/// Notifications
fn notification_routes() -> Router<AppState> {
    Router::new().route("/notifications", post(handlers::notification::mark_read))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
