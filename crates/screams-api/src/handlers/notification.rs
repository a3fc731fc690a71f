//! Notification handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /notifications
///
/// Body is a JSON array of notification ids.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(ids): Json<Vec<String>>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notification_service.mark_read(&auth, &ids).await?;
    Ok(Json(MessageResponse::new("Notifications marked read")))
}
