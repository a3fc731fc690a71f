//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use screams_core::types::{Collection, timestamp};

use crate::model::DocumentModel;

/// A comment on a scream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Document id.
    pub comment_id: String,
    /// Comment text (never blank).
    pub body: String,
    /// Scream the comment belongs to.
    pub scream_id: String,
    /// Author handle.
    pub user_handle: String,
    /// Author image URL at the time of commenting.
    #[serde(default)]
    pub user_image: String,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current time.
    pub fn new(
        comment_id: impl Into<String>,
        body: impl Into<String>,
        scream_id: impl Into<String>,
        user_handle: impl Into<String>,
        user_image: impl Into<String>,
    ) -> Self {
        Self {
            comment_id: comment_id.into(),
            body: body.into(),
            scream_id: scream_id.into(),
            user_handle: user_handle.into(),
            user_image: user_image.into(),
            created_at: Utc::now(),
        }
    }
}

impl DocumentModel for Comment {
    const COLLECTION: Collection = Collection::Comments;
    const ID_FIELD: &'static str = "commentId";

    fn id(&self) -> &str {
        &self.comment_id
    }
}
