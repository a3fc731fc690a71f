//! Login credential entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use screams_core::types::{Collection, timestamp};

use crate::model::DocumentModel;

/// Email/password credential, keyed by the lower-cased email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Lower-cased email (document id).
    pub email: String,
    /// Stable user identifier carried in issued tokens.
    pub user_id: String,
    /// Handle of the owning user.
    pub handle: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Normalize an email address into a credential key.
    pub fn key_for(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

impl DocumentModel for Credential {
    const COLLECTION: Collection = Collection::Credentials;
    const ID_FIELD: &'static str = "email";

    fn id(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_normalized() {
        assert_eq!(Credential::key_for("  Alice@Example.COM "), "alice@example.com");
    }
}
