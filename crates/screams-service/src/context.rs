//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use screams_auth::Identity;

/// Context for the current authenticated request.
///
/// Built by the API layer from a verified bearer token and passed into
/// service methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's stable user id.
    pub user_id: String,
    /// The caller's handle.
    pub handle: String,
    /// The caller's profile image URL at request time.
    pub image_url: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: impl Into<String>,
        handle: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            handle: handle.into(),
            image_url: image_url.into(),
            request_time: Utc::now(),
        }
    }
}

impl From<Identity> for RequestContext {
    fn from(identity: Identity) -> Self {
        Self::new(identity.user_id, identity.handle, identity.image_url)
    }
}
