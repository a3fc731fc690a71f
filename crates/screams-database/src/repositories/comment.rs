//! Comment repository implementation.

use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{Collection, Direction, Query};
use screams_entity::{Comment, DocumentModel};

use super::{decode_after, fetch_all};
use crate::provider::DocumentDatabase;

/// Repository for comment documents.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    db: DocumentDatabase,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(db: DocumentDatabase) -> Self {
        Self { db }
    }

    /// Comments on a scream, newest first.
    pub async fn find_by_scream(&self, scream_id: &str) -> AppResult<Vec<Comment>> {
        let query = Query::new(Collection::Comments)
            .where_eq("screamId", scream_id)
            .order_by("createdAt", Direction::Desc);
        fetch_all(&self.db, &query).await
    }

    /// Insert a new comment under its own id.
    pub async fn create(&self, comment: &Comment) -> AppResult<Comment> {
        let change = self
            .db
            .create(Collection::Comments, Some(comment.id()), comment.to_fields()?)
            .await?;
        decode_after(change)
    }
}
