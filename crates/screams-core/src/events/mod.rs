//! Document change events.
//!
//! Every successful write to the store produces one [`DocumentEvent`] per
//! touched document. Events are pushed onto the [`EventBus`] and consumed
//! by the trigger runner, which fans them out to registered handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::types::{ChangeKind, Collection, Document, DocumentChange};

/// A committed change to one document, with before/after snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the change was committed.
    pub timestamp: DateTime<Utc>,
    /// Collection of the changed document.
    pub collection: Collection,
    /// ID of the changed document.
    pub document_id: String,
    /// Kind of change.
    pub kind: ChangeKind,
    /// Snapshot before the write (`None` for creates).
    pub before: Option<Document>,
    /// Snapshot after the write (`None` for deletes).
    pub after: Option<Document>,
}

impl DocumentEvent {
    /// Build an event from a store change. Returns `None` for no-op writes.
    pub fn from_change(change: DocumentChange) -> Option<Self> {
        let kind = change.kind()?;
        Some(Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            collection: change.collection,
            document_id: change.id,
            kind,
            before: change.before,
            after: change.after,
        })
    }

    /// The most recent snapshot: `after` for creates/updates, `before` for deletes.
    pub fn snapshot(&self) -> Option<&Document> {
        self.after.as_ref().or(self.before.as_ref())
    }
}

/// Sending half of the change stream.
///
/// Cloning is cheap. Publishing never blocks and never fails the write that
/// produced the event: once the receiving side is gone, events are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<DocumentEvent>,
}

/// Receiving half of the change stream.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<DocumentEvent>,
}

impl EventBus {
    /// Create a connected bus/stream pair.
    pub fn new() -> (Self, EventStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, EventStream { rx })
    }

    /// Publish the events derived from a set of store changes.
    pub fn publish_changes(&self, changes: &[DocumentChange]) {
        for change in changes {
            if let Some(event) = DocumentEvent::from_change(change.clone()) {
                self.publish(event);
            }
        }
    }

    /// Publish a single event.
    pub fn publish(&self, event: DocumentEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Event stream closed, dropping event");
        }
    }
}

impl EventStream {
    /// Wait for the next event. `None` once every bus handle is dropped.
    pub async fn recv(&mut self) -> Option<DocumentEvent> {
        self.rx.recv().await
    }

    /// Take an event if one is immediately available.
    pub fn try_recv(&mut self) -> Option<DocumentEvent> {
        self.rx.try_recv().ok()
    }

    /// Whether no event is currently queued.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
