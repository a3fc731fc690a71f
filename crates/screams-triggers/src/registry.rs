//! Trigger registry: handlers registered by `(collection, change kind)`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use screams_database::DocumentDatabase;

use crate::handler::{TriggerHandler, TriggerPoint};
use crate::handlers::{
    CascadeScreamDelete, DeleteNotificationOnUnlike, NotifyOnComment, NotifyOnLike,
    PropagateUserImage,
};

/// Registry of trigger handlers organized by trigger point.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    handlers: RwLock<HashMap<TriggerPoint, Vec<Arc<dyn TriggerHandler>>>>,
}

impl TriggerRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in handler writing through `db`.
    pub async fn with_defaults(db: &DocumentDatabase) -> Self {
        let registry = Self::new();
        registry.register(Arc::new(NotifyOnLike::new(db.clone()))).await;
        registry.register(Arc::new(NotifyOnComment::new(db.clone()))).await;
        registry
            .register(Arc::new(DeleteNotificationOnUnlike::new(db.clone())))
            .await;
        registry.register(Arc::new(CascadeScreamDelete::new(db.clone()))).await;
        registry.register(Arc::new(PropagateUserImage::new(db.clone()))).await;
        registry
    }

    /// Registers a handler under the point it subscribes to.
    pub async fn register(&self, handler: Arc<dyn TriggerHandler>) {
        let point = handler.point();
        let name = handler.name().to_string();

        self.handlers
            .write()
            .await
            .entry(point)
            .or_default()
            .push(handler);

        info!(point = %point, handler = %name, "Trigger handler registered");
    }

    /// Returns the handlers for a point, in registration order.
    pub async fn handlers_for(&self, point: &TriggerPoint) -> Vec<Arc<dyn TriggerHandler>> {
        self.handlers
            .read()
            .await
            .get(point)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of handlers registered for a point.
    pub async fn handler_count(&self, point: &TriggerPoint) -> usize {
        self.handlers.read().await.get(point).map_or(0, Vec::len)
    }

    /// Returns all points with at least one handler.
    pub async fn registered_points(&self) -> Vec<TriggerPoint> {
        self.handlers.read().await.keys().copied().collect()
    }
}
