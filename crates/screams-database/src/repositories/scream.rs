//! Scream repository implementation.

use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{Collection, Direction, DocumentChange, Query};
use screams_entity::scream::{COMMENT_COUNT, LIKE_COUNT};
use screams_entity::{DocumentModel, Scream};

use super::{decode_after, fetch, fetch_all};
use crate::provider::DocumentDatabase;

/// Repository for scream documents.
#[derive(Debug, Clone)]
pub struct ScreamRepository {
    db: DocumentDatabase,
}

impl ScreamRepository {
    /// Create a new scream repository.
    pub fn new(db: DocumentDatabase) -> Self {
        Self { db }
    }

    /// Find a scream by id.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Scream>> {
        fetch(&self.db, id).await
    }

    /// All screams, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Scream>> {
        let query = Query::new(Collection::Screams).order_by("createdAt", Direction::Desc);
        fetch_all(&self.db, &query).await
    }

    /// Screams written by `handle`, newest first.
    pub async fn find_by_author(&self, handle: &str) -> AppResult<Vec<Scream>> {
        let query = Query::new(Collection::Screams)
            .where_eq("userHandle", handle)
            .order_by("createdAt", Direction::Desc);
        fetch_all(&self.db, &query).await
    }

    /// Insert a new scream under its own id.
    pub async fn create(&self, scream: &Scream) -> AppResult<Scream> {
        let change = self
            .db
            .create(Collection::Screams, Some(scream.id()), scream.to_fields()?)
            .await?;
        decode_after(change)
    }

    /// Atomically adjust the like counter and return the updated scream.
    pub async fn add_likes(&self, id: &str, delta: i64) -> AppResult<Scream> {
        let change = self
            .db
            .increment(Collection::Screams, id, LIKE_COUNT, delta)
            .await?;
        decode_after(change)
    }

    /// Atomically adjust the comment counter and return the updated scream.
    pub async fn add_comments(&self, id: &str, delta: i64) -> AppResult<Scream> {
        let change = self
            .db
            .increment(Collection::Screams, id, COMMENT_COUNT, delta)
            .await?;
        decode_after(change)
    }

    /// Delete a scream document (dependent documents are left to triggers).
    pub async fn delete(&self, id: &str) -> AppResult<DocumentChange> {
        self.db.delete(Collection::Screams, id).await
    }
}
