//! Notifications derived from likes and comments.

use async_trait::async_trait;
use tracing::debug;

use screams_core::events::DocumentEvent;
use screams_core::result::AppResult;
use screams_core::types::{ChangeKind, Collection};
use screams_database::DocumentDatabase;
use screams_database::repositories::{NotificationRepository, ScreamRepository};
use screams_entity::{Comment, DocumentModel, Like, Notification, NotificationType};

use crate::handler::{TriggerHandler, TriggerPoint};

/// Writes `notifications/{source_id}` for the author of `scream_id`,
/// unless the author is the sender or the scream is gone.
async fn notify_author(
    screams: &ScreamRepository,
    notifications: &NotificationRepository,
    source_id: &str,
    scream_id: &str,
    sender: &str,
    kind: NotificationType,
) -> AppResult<()> {
    let Some(scream) = screams.find_by_id(scream_id).await? else {
        debug!(scream_id, source_id, "Scream gone, no notification");
        return Ok(());
    };

    if scream.is_authored_by(sender) {
        debug!(scream_id, sender, "Own scream, no notification");
        return Ok(());
    }

    let notification = Notification::new(source_id, &scream.user_handle, sender, kind, scream_id);
    notifications.upsert(&notification).await?;

    debug!(
        notification_id = source_id,
        recipient = %scream.user_handle,
        sender,
        kind = %kind,
        "Notification created"
    );
    Ok(())
}

/// `likes` created → notify the scream author.
#[derive(Debug, Clone)]
pub struct NotifyOnLike {
    screams: ScreamRepository,
    notifications: NotificationRepository,
}

impl NotifyOnLike {
    /// Creates the handler.
    pub fn new(db: DocumentDatabase) -> Self {
        Self {
            screams: ScreamRepository::new(db.clone()),
            notifications: NotificationRepository::new(db),
        }
    }
}

#[async_trait]
impl TriggerHandler for NotifyOnLike {
    fn name(&self) -> &str {
        "notify_on_like"
    }

    fn point(&self) -> TriggerPoint {
        TriggerPoint::new(Collection::Likes, ChangeKind::Created)
    }

    async fn handle(&self, event: &DocumentEvent) -> AppResult<()> {
        let Some(doc) = event.after.clone() else {
            return Ok(());
        };
        let like = Like::from_document(doc)?;
        notify_author(
            &self.screams,
            &self.notifications,
            &like.like_id,
            &like.scream_id,
            &like.user_handle,
            NotificationType::Like,
        )
        .await
    }
}

/// `comments` created → notify the scream author.
#[derive(Debug, Clone)]
pub struct NotifyOnComment {
    screams: ScreamRepository,
    notifications: NotificationRepository,
}

impl NotifyOnComment {
    /// Creates the handler.
    pub fn new(db: DocumentDatabase) -> Self {
        Self {
            screams: ScreamRepository::new(db.clone()),
            notifications: NotificationRepository::new(db),
        }
    }
}

#[async_trait]
impl TriggerHandler for NotifyOnComment {
    fn name(&self) -> &str {
        "notify_on_comment"
    }

    fn point(&self) -> TriggerPoint {
        TriggerPoint::new(Collection::Comments, ChangeKind::Created)
    }

    async fn handle(&self, event: &DocumentEvent) -> AppResult<()> {
        let Some(doc) = event.after.clone() else {
            return Ok(());
        };
        let comment = Comment::from_document(doc)?;
        notify_author(
            &self.screams,
            &self.notifications,
            &comment.comment_id,
            &comment.scream_id,
            &comment.user_handle,
            NotificationType::Comment,
        )
        .await
    }
}

/// `likes` deleted → delete the notification keyed by the like id.
#[derive(Debug, Clone)]
pub struct DeleteNotificationOnUnlike {
    notifications: NotificationRepository,
}

impl DeleteNotificationOnUnlike {
    /// Creates the handler.
    pub fn new(db: DocumentDatabase) -> Self {
        Self {
            notifications: NotificationRepository::new(db),
        }
    }
}

#[async_trait]
impl TriggerHandler for DeleteNotificationOnUnlike {
    fn name(&self) -> &str {
        "delete_notification_on_unlike"
    }

    fn point(&self) -> TriggerPoint {
        TriggerPoint::new(Collection::Likes, ChangeKind::Deleted)
    }

    async fn handle(&self, event: &DocumentEvent) -> AppResult<()> {
        self.notifications.delete(&event.document_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screams_core::events::EventBus;
    use screams_core::types::{Document, DocumentChange, Fields};
    use screams_entity::Scream;

    async fn setup() -> (DocumentDatabase, NotificationRepository) {
        let (bus, _stream) = EventBus::new();
        let db = DocumentDatabase::in_memory(bus);
        let screams = ScreamRepository::new(db.clone());
        screams
            .create(&Scream::new("s1", "hello", "alice", "img"))
            .await
            .expect("create");
        let notifications = NotificationRepository::new(db.clone());
        (db, notifications)
    }

    fn like_event(like: &Like) -> DocumentEvent {
        let doc = Document::new(like.like_id.clone(), like.to_fields().expect("fields"));
        DocumentEvent::from_change(DocumentChange::new(Collection::Likes, &like.like_id, None, Some(doc)))
            .expect("created")
    }

    #[tokio::test]
    async fn test_like_notifies_author() {
        let (db, notifications) = setup().await;
        let handler = NotifyOnLike::new(db);
        handler
            .handle(&like_event(&Like::new("l1", "s1", "bob")))
            .await
            .expect("handle");

        let n = notifications.find_by_id("l1").await.expect("get").expect("exists");
        assert_eq!(n.recipient, "alice");
        assert_eq!(n.sender, "bob");
        assert_eq!(n.kind, NotificationType::Like);
        assert!(!n.read);
    }

    #[tokio::test]
    async fn test_self_like_is_silent() {
        let (db, notifications) = setup().await;
        NotifyOnLike::new(db)
            .handle(&like_event(&Like::new("l1", "s1", "alice")))
            .await
            .expect("handle");
        assert!(notifications.find_by_id("l1").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn test_missing_scream_is_silent() {
        let (db, notifications) = setup().await;
        NotifyOnLike::new(db)
            .handle(&like_event(&Like::new("l1", "gone", "bob")))
            .await
            .expect("handle");
        assert!(notifications.find_by_id("l1").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn test_unlike_removes_notification() {
        let (db, notifications) = setup().await;
        notifications
            .upsert(&Notification::new("l1", "alice", "bob", NotificationType::Like, "s1"))
            .await
            .expect("upsert");

        let event = DocumentEvent::from_change(DocumentChange::new(
            Collection::Likes,
            "l1",
            Some(Document::new("l1", Fields::new())),
            None,
        ))
        .expect("deleted");
        DeleteNotificationOnUnlike::new(db)
            .handle(&event)
            .await
            .expect("handle");
        assert!(notifications.find_by_id("l1").await.expect("get").is_none());
    }
}
