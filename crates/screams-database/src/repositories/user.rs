//! User repository implementation.

use serde_json::Value;

use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{Collection, DocumentChange, Fields, Query, WriteBatch};
use screams_entity::user::model::IMAGE_URL;
use screams_entity::{Credential, DocumentModel, User, UserDetails};

use super::{fetch, fetch_all};
use crate::provider::DocumentDatabase;

/// Repository for user profiles.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DocumentDatabase,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(db: DocumentDatabase) -> Self {
        Self { db }
    }

    /// Find a user by handle.
    pub async fn find_by_handle(&self, handle: &str) -> AppResult<Option<User>> {
        fetch(&self.db, handle).await
    }

    /// Find a user by the stable id carried in tokens.
    pub async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<User>> {
        let query = Query::new(Collection::Users)
            .where_eq("userId", user_id)
            .limit(1);
        Ok(fetch_all(&self.db, &query).await?.into_iter().next())
    }

    /// Create a user profile and its credential atomically.
    ///
    /// Fails with `Conflict` if either the handle or the email is taken.
    pub async fn register(&self, user: &User, credential: &Credential) -> AppResult<()> {
        let mut batch = WriteBatch::new();
        batch
            .create(Collection::Credentials, credential.id(), credential.to_fields()?)
            .create(Collection::Users, user.id(), user.to_fields()?);
        self.db.commit(batch).await?;
        Ok(())
    }

    /// Replace the profile image URL.
    pub async fn update_image(&self, handle: &str, image_url: &str) -> AppResult<DocumentChange> {
        let mut fields = Fields::new();
        fields.insert(IMAGE_URL.to_string(), Value::String(image_url.to_string()));
        self.db.update(Collection::Users, handle, fields).await
    }

    /// Merge the set detail fields into the profile.
    pub async fn update_details(
        &self,
        handle: &str,
        details: &UserDetails,
    ) -> AppResult<DocumentChange> {
        self.db
            .update(Collection::Users, handle, details.to_fields())
            .await
    }
}
