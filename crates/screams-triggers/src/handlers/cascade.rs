//! Removal of everything that references a deleted scream.

use async_trait::async_trait;
use tracing::info;

use screams_core::events::DocumentEvent;
use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{ChangeKind, Collection, Query, WriteBatch};
use screams_database::DocumentDatabase;

use crate::handler::{TriggerHandler, TriggerPoint};

/// Collections holding documents keyed to a scream via `screamId`.
const DEPENDENTS: [Collection; 3] = [
    Collection::Comments,
    Collection::Likes,
    Collection::Notifications,
];

/// `screams` deleted → delete its comments, likes and notifications in one batch.
///
/// A failing lookup aborts the whole cascade before anything is deleted.
#[derive(Debug, Clone)]
pub struct CascadeScreamDelete {
    db: DocumentDatabase,
}

impl CascadeScreamDelete {
    /// Creates the handler.
    pub fn new(db: DocumentDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TriggerHandler for CascadeScreamDelete {
    fn name(&self) -> &str {
        "cascade_scream_delete"
    }

    fn point(&self) -> TriggerPoint {
        TriggerPoint::new(Collection::Screams, ChangeKind::Deleted)
    }

    async fn handle(&self, event: &DocumentEvent) -> AppResult<()> {
        let scream_id = event.document_id.as_str();
        let mut batch = WriteBatch::new();

        for collection in DEPENDENTS {
            let query = Query::new(collection).where_eq("screamId", scream_id);
            for doc in self.db.query(&query).await? {
                batch.delete(collection, doc.id);
            }
        }

        if batch.is_empty() {
            return Ok(());
        }

        let removed = batch.len();
        self.db.commit(batch).await?;
        info!(scream_id, removed, "Cascade delete completed");
        Ok(())
    }
}
