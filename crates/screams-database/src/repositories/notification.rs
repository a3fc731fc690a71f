//! Notification repository implementation.

use serde_json::Value;

use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{Collection, Direction, DocumentChange, Fields, Query, WriteBatch};
use screams_entity::{DocumentModel, Notification};

use super::{fetch, fetch_all};
use crate::provider::DocumentDatabase;

/// Repository for notification documents.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DocumentDatabase,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(db: DocumentDatabase) -> Self {
        Self { db }
    }

    /// Find a notification by id.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Notification>> {
        fetch(&self.db, id).await
    }

    /// Latest notifications addressed to `handle`, newest first.
    pub async fn find_for_recipient(
        &self,
        handle: &str,
        limit: usize,
    ) -> AppResult<Vec<Notification>> {
        let query = Query::new(Collection::Notifications)
            .where_eq("recipient", handle)
            .order_by("createdAt", Direction::Desc)
            .limit(limit);
        fetch_all(&self.db, &query).await
    }

    /// Write a notification under its own id, replacing any previous one.
    pub async fn upsert(&self, notification: &Notification) -> AppResult<DocumentChange> {
        self.db
            .set(
                Collection::Notifications,
                notification.id(),
                notification.to_fields()?,
            )
            .await
    }

    /// Delete a notification. Missing ids are ignored.
    pub async fn delete(&self, id: &str) -> AppResult<DocumentChange> {
        self.db.delete(Collection::Notifications, id).await
    }

    /// Set `read: true` on every listed notification in one batch.
    pub async fn mark_read(&self, ids: &[String]) -> AppResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut batch = WriteBatch::new();
        for id in ids {
            let mut fields = Fields::new();
            fields.insert("read".to_string(), Value::Bool(true));
            batch.update(Collection::Notifications, id.clone(), fields);
        }
        Ok(self.db.commit(batch).await?.len())
    }
}
