//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use screams_core::types::{Collection, timestamp};

use crate::model::DocumentModel;

/// Field holding the profile image URL.
pub const IMAGE_URL: &str = "imageUrl";

/// A user profile, keyed by its unique handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique handle (document id).
    pub handle: String,
    /// Stable identifier, the `sub` claim of issued tokens.
    pub user_id: String,
    /// Email address used to sign up.
    pub email: String,
    /// Sign-up time.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Profile image URL.
    pub image_url: String,
    /// Free-form biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Personal website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl DocumentModel for User {
    const COLLECTION: Collection = Collection::Users;
    const ID_FIELD: &'static str = "handle";

    fn id(&self) -> &str {
        &self.handle
    }
}
