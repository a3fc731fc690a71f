//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use screams_core::types::{Collection, timestamp};

use super::kind::NotificationType;
use crate::model::DocumentModel;

/// A like/comment notification addressed to a scream's author.
///
/// The document id equals the id of the like or comment that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Document id (the source like/comment id).
    pub notification_id: String,
    /// When the notification was created.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Handle of the scream author.
    pub recipient: String,
    /// Handle of the user who liked/commented.
    pub sender: String,
    /// Cause.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Whether the recipient has seen it.
    #[serde(default)]
    pub read: bool,
    /// Scream the notification is about.
    pub scream_id: String,
}

impl Notification {
    /// Create an unread notification stamped with the current time.
    pub fn new(
        notification_id: impl Into<String>,
        recipient: impl Into<String>,
        sender: impl Into<String>,
        kind: NotificationType,
        scream_id: impl Into<String>,
    ) -> Self {
        Self {
            notification_id: notification_id.into(),
            created_at: Utc::now(),
            recipient: recipient.into(),
            sender: sender.into(),
            kind,
            read: false,
            scream_id: scream_id.into(),
        }
    }
}

impl DocumentModel for Notification {
    const COLLECTION: Collection = Collection::Notifications;
    const ID_FIELD: &'static str = "notificationId";

    fn id(&self) -> &str {
        &self.notification_id
    }
}
