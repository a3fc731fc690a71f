//! Scream entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use screams_core::types::{Collection, timestamp};

use crate::comment::Comment;
use crate::model::DocumentModel;

/// Field holding the number of likes.
pub const LIKE_COUNT: &str = "likeCount";
/// Field holding the number of comments.
pub const COMMENT_COUNT: &str = "commentCount";

/// A short text post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scream {
    /// Document id.
    pub scream_id: String,
    /// Post text (never blank).
    pub body: String,
    /// Author handle.
    pub user_handle: String,
    /// Author image URL, kept in sync with the author's profile.
    #[serde(default)]
    pub user_image: String,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Number of likes.
    #[serde(default)]
    pub like_count: u64,
    /// Number of comments.
    #[serde(default)]
    pub comment_count: u64,
}

impl Scream {
    /// Create a fresh scream with zero counters.
    pub fn new(
        scream_id: impl Into<String>,
        body: impl Into<String>,
        user_handle: impl Into<String>,
        user_image: impl Into<String>,
    ) -> Self {
        Self {
            scream_id: scream_id.into(),
            body: body.into(),
            user_handle: user_handle.into(),
            user_image: user_image.into(),
            created_at: Utc::now(),
            like_count: 0,
            comment_count: 0,
        }
    }

    /// Whether `handle` wrote this scream.
    pub fn is_authored_by(&self, handle: &str) -> bool {
        self.user_handle == handle
    }
}

impl DocumentModel for Scream {
    const COLLECTION: Collection = Collection::Screams;
    const ID_FIELD: &'static str = "screamId";

    fn id(&self) -> &str {
        &self.scream_id
    }
}

/// A scream together with its comments, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreamWithComments {
    /// The scream.
    #[serde(flatten)]
    pub scream: Scream,
    /// Comments ordered by `createdAt` descending.
    pub comments: Vec<Comment>,
}
