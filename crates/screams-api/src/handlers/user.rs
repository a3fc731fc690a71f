//! Account and profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use screams_service::user::{AuthToken, AuthenticatedUser, UserProfile};

use crate::dto::request::{AddDetailsRequest, LoginRequest, SetImageRequest, SignupRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthToken>), ApiError> {
    let token = state.user_service.signup(req.into()).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthToken>, ApiError> {
    Ok(Json(state.user_service.login(req.into()).await?))
}

/// POST /users/image
pub async fn set_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SetImageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()?;
    state.user_service.set_image(&auth, &req.image_url).await?;
    Ok(Json(MessageResponse::new("Image uploaded successfully")))
}

/// POST /users
pub async fn add_details(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddDetailsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.user_service.add_details(&auth, req.into()).await?;
    Ok(Json(MessageResponse::new("Details added successfully")))
}

/// GET /users
pub async fn authenticated_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    Ok(Json(state.user_service.authenticated_user(&auth).await?))
}

/// GET /users/{handle}
pub async fn user_details(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.user_service.user_details(&handle).await?))
}
