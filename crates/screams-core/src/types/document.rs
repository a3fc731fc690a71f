//! Schemaless documents and the change record produced by every write.

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::collection::Collection;

/// Length of generated document identifiers.
pub const GENERATED_ID_LEN: usize = 20;

/// Field map of a document body.
pub type Fields = Map<String, Value>;

/// A stored document: its id plus a JSON object body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier, unique within its collection.
    pub id: String,
    /// Document body.
    pub data: Fields,
}

impl Document {
    /// Create a document from an id and a body.
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Return a field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Return a string field, if present and a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }

    /// Return an integer field, if present and an integer.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.data.get(field).and_then(Value::as_i64)
    }

    /// Shallow-merge `fields` into this document's body.
    pub fn merge(&mut self, fields: &Fields) {
        for (key, value) in fields {
            self.data.insert(key.clone(), value.clone());
        }
    }

    /// Add `delta` to an integer field (missing counts as zero), never going below zero.
    ///
    /// Returns the new value.
    pub fn increment(&mut self, field: &str, delta: i64) -> i64 {
        let current = self.get_i64(field).unwrap_or(0);
        let next = current.saturating_add(delta).max(0);
        self.data.insert(field.to_string(), Value::from(next));
        next
    }
}

/// Generate a random 20-character alphanumeric document id.
pub fn generate_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_ID_LEN)
        .map(char::from)
        .collect()
}

/// What kind of change a write made to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// The document did not exist before the write.
    Created,
    /// The document existed before and after the write.
    Updated,
    /// The document existed before and not after the write.
    Deleted,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Before/after snapshot of one document touched by a write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChange {
    /// Collection the document lives in.
    pub collection: Collection,
    /// Document id.
    pub id: String,
    /// Body before the write (`None` if it did not exist).
    pub before: Option<Document>,
    /// Body after the write (`None` if it no longer exists).
    pub after: Option<Document>,
}

impl DocumentChange {
    /// Create a change record.
    pub fn new(
        collection: Collection,
        id: impl Into<String>,
        before: Option<Document>,
        after: Option<Document>,
    ) -> Self {
        Self {
            collection,
            id: id.into(),
            before,
            after,
        }
    }

    /// Classify the change. `None` means the write was a no-op
    /// (e.g. deleting a document that did not exist).
    pub fn kind(&self) -> Option<ChangeKind> {
        match (&self.before, &self.after) {
            (None, Some(_)) => Some(ChangeKind::Created),
            (Some(_), Some(_)) => Some(ChangeKind::Updated),
            (Some(_), None) => Some(ChangeKind::Deleted),
            (None, None) => None,
        }
    }
}
