//! Trigger handler trait and subscription key.

use std::fmt;

use async_trait::async_trait;

use screams_core::events::DocumentEvent;
use screams_core::result::AppResult;
use screams_core::types::{ChangeKind, Collection};

/// The `(collection, change kind)` pair a handler subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerPoint {
    /// Watched collection.
    pub collection: Collection,
    /// Watched kind of change.
    pub kind: ChangeKind,
}

impl TriggerPoint {
    /// Creates a trigger point.
    pub const fn new(collection: Collection, kind: ChangeKind) -> Self {
        Self { collection, kind }
    }

    /// The trigger point an event fires.
    pub fn of(event: &DocumentEvent) -> Self {
        Self::new(event.collection, event.kind)
    }
}

impl fmt::Display for TriggerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.kind)
    }
}

/// A stateless reaction to one kind of document change.
#[async_trait]
pub trait TriggerHandler: Send + Sync + fmt::Debug {
    /// Handler name for logs.
    fn name(&self) -> &str;

    /// What the handler subscribes to.
    fn point(&self) -> TriggerPoint;

    /// Reacts to one event by performing derived writes.
    async fn handle(&self, event: &DocumentEvent) -> AppResult<()>;
}
