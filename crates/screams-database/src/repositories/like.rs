//! Like repository implementation.

use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{Collection, DocumentChange, Query};
use screams_entity::{DocumentModel, Like};

use super::{decode_after, fetch_all};
use crate::provider::DocumentDatabase;

/// Repository for like documents.
#[derive(Debug, Clone)]
pub struct LikeRepository {
    db: DocumentDatabase,
}

impl LikeRepository {
    /// Create a new like repository.
    pub fn new(db: DocumentDatabase) -> Self {
        Self { db }
    }

    /// The like `handle` gave `scream_id`, if any.
    pub async fn find_by_user_and_scream(
        &self,
        handle: &str,
        scream_id: &str,
    ) -> AppResult<Option<Like>> {
        let query = Query::new(Collection::Likes)
            .where_eq("userHandle", handle)
            .where_eq("screamId", scream_id)
            .limit(1);
        Ok(fetch_all(&self.db, &query).await?.into_iter().next())
    }

    /// Every like given by `handle`.
    pub async fn find_by_user(&self, handle: &str) -> AppResult<Vec<Like>> {
        let query = Query::new(Collection::Likes).where_eq("userHandle", handle);
        fetch_all(&self.db, &query).await
    }

    /// Insert a new like under its own id.
    pub async fn create(&self, like: &Like) -> AppResult<Like> {
        let change = self
            .db
            .create(Collection::Likes, Some(like.id()), like.to_fields()?)
            .await?;
        decode_after(change)
    }

    /// Delete a like.
    pub async fn delete(&self, id: &str) -> AppResult<DocumentChange> {
        self.db.delete(Collection::Likes, id).await
    }
}
