//! Like entity model.

use serde::{Deserialize, Serialize};

use screams_core::types::Collection;

use crate::model::DocumentModel;

/// A user's like of a scream. At most one exists per (user, scream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    /// Document id.
    pub like_id: String,
    /// Liked scream.
    pub scream_id: String,
    /// Handle of the user who liked it.
    pub user_handle: String,
}

impl Like {
    /// Create a like.
    pub fn new(
        like_id: impl Into<String>,
        scream_id: impl Into<String>,
        user_handle: impl Into<String>,
    ) -> Self {
        Self {
            like_id: like_id.into(),
            scream_id: scream_id.into(),
            user_handle: user_handle.into(),
        }
    }
}

impl DocumentModel for Like {
    const COLLECTION: Collection = Collection::Likes;
    const ID_FIELD: &'static str = "likeId";

    fn id(&self) -> &str {
        &self.like_id
    }
}
