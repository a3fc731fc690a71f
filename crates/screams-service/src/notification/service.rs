//! Notification read-state management.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use screams_core::result::AppResult;
use screams_database::repositories::NotificationRepository;

use crate::context::RequestContext;

/// Handles notification use cases.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Marks the listed notifications as read in one batch.
    ///
    /// Only notifications addressed to the caller are touched; unknown ids
    /// and other users' notifications are skipped. Returns how many were
    /// updated.
    pub async fn mark_read(&self, ctx: &RequestContext, ids: &[String]) -> AppResult<usize> {
        let mut owned = Vec::new();
        for id in ids.iter().collect::<BTreeSet<_>>() {
            match self.notifications.find_by_id(id).await? {
                Some(n) if n.recipient == ctx.handle => owned.push(id.clone()),
                Some(_) => debug!(notification_id = %id, "Skipping notification of another user"),
                None => debug!(notification_id = %id, "Skipping unknown notification"),
            }
        }

        let updated = self.notifications.mark_read(&owned).await?;
        info!(handle = %ctx.handle, updated, "Notifications marked read");
        Ok(updated)
    }
}
