//! Propagation of profile image changes onto existing screams.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use screams_core::events::DocumentEvent;
use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{ChangeKind, Collection, Fields, Query, WriteBatch};
use screams_database::DocumentDatabase;
use screams_entity::user::model::IMAGE_URL;

use crate::handler::{TriggerHandler, TriggerPoint};

/// `users` updated → when `imageUrl` changed, rewrite `userImage` on every
/// scream by that user in one batch.
#[derive(Debug, Clone)]
pub struct PropagateUserImage {
    db: DocumentDatabase,
}

impl PropagateUserImage {
    /// Creates the handler.
    pub fn new(db: DocumentDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TriggerHandler for PropagateUserImage {
    fn name(&self) -> &str {
        "propagate_user_image"
    }

    fn point(&self) -> TriggerPoint {
        TriggerPoint::new(Collection::Users, ChangeKind::Updated)
    }

    async fn handle(&self, event: &DocumentEvent) -> AppResult<()> {
        let before = event.before.as_ref().and_then(|d| d.get(IMAGE_URL));
        let after = event.after.as_ref().and_then(|d| d.get(IMAGE_URL));

        let Some(image_url) = after.filter(|_| before != after) else {
            debug!(handle = %event.document_id, "Image unchanged");
            return Ok(());
        };

        let handle = event.document_id.as_str();
        let query = Query::new(Collection::Screams).where_eq("userHandle", handle);
        let screams = self.db.query(&query).await?;
        if screams.is_empty() {
            return Ok(());
        }

        let mut batch = WriteBatch::new();
        for scream in screams {
            let mut fields = Fields::new();
            fields.insert("userImage".to_string(), Value::clone(image_url));
            batch.update(Collection::Screams, scream.id, fields);
        }

        let updated = batch.len();
        self.db.commit(batch).await?;
        info!(handle, updated, "Profile image propagated");
        Ok(())
    }
}
