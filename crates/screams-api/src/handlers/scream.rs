//! Scream, comment and like handlers.

use axum::Json;
use axum::extract::{Path, State};

use screams_entity::{Comment, Scream, ScreamWithComments};

use crate::dto::request::{CommentRequest, CreateScreamRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /screams
pub async fn list_screams(State(state): State<AppState>) -> Result<Json<Vec<Scream>>, ApiError> {
    Ok(Json(state.scream_service.list().await?))
}

/// POST /screams
pub async fn create_scream(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateScreamRequest>,
) -> Result<Json<Scream>, ApiError> {
    let scream = state.scream_service.create(&auth, &req.body).await?;
    Ok(Json(scream))
}

/// GET /scream/{id}
pub async fn get_scream(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScreamWithComments>, ApiError> {
    Ok(Json(state.scream_service.get(&id).await?))
}

/// POST /scream/{id}/comment
pub async fn comment_on_scream(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.scream_service.comment(&auth, &id, &req.body).await?;
    Ok(Json(comment))
}

/// GET /scream/{id}/like
pub async fn like_scream(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Scream>, ApiError> {
    Ok(Json(state.scream_service.like(&auth, &id).await?))
}

/// GET /scream/{id}/unlike
pub async fn unlike_scream(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Scream>, ApiError> {
    Ok(Json(state.scream_service.unlike(&auth, &id).await?))
}

/// DELETE /scream/{id}
pub async fn delete_scream(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.scream_service.delete(&auth, &id).await?;
    Ok(Json(MessageResponse::new("Scream deleted successfully")))
}
