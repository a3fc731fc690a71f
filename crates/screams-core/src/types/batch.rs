//! Atomic multi-document writes.

use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::document::Fields;

/// One write inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WriteOp {
    /// Insert a new document; the whole batch fails if it already exists.
    Create {
        collection: Collection,
        id: String,
        data: Fields,
    },
    /// Insert or fully replace a document.
    Set {
        collection: Collection,
        id: String,
        data: Fields,
    },
    /// Merge fields into an existing document; the whole batch fails if it is missing.
    Update {
        collection: Collection,
        id: String,
        fields: Fields,
    },
    /// Remove a document if present.
    Delete { collection: Collection, id: String },
}

impl WriteOp {
    /// Collection and id this operation targets.
    pub fn target(&self) -> (Collection, &str) {
        match self {
            Self::Create { collection, id, .. }
            | Self::Set { collection, id, .. }
            | Self::Update { collection, id, .. }
            | Self::Delete { collection, id } => (*collection, id.as_str()),
        }
    }
}

/// Ordered list of writes applied all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a create.
    pub fn create(&mut self, collection: Collection, id: impl Into<String>, data: Fields) -> &mut Self {
        self.ops.push(WriteOp::Create {
            collection,
            id: id.into(),
            data,
        });
        self
    }

    /// Queue a set.
    pub fn set(&mut self, collection: Collection, id: impl Into<String>, data: Fields) -> &mut Self {
        self.ops.push(WriteOp::Set {
            collection,
            id: id.into(),
            data,
        });
        self
    }

    /// Queue a merge update.
    pub fn update(&mut self, collection: Collection, id: impl Into<String>, fields: Fields) -> &mut Self {
        self.ops.push(WriteOp::Update {
            collection,
            id: id.into(),
            fields,
        });
        self
    }

    /// Queue a delete.
    pub fn delete(&mut self, collection: Collection, id: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection,
            id: id.into(),
        });
        self
    }

    /// Queued operations in order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Consume the batch.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let mut batch = WriteBatch::new();
        batch
            .delete(Collection::Likes, "l1")
            .update(Collection::Screams, "s1", Fields::new());
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.ops()[0].target(), (Collection::Likes, "l1"));
        assert_eq!(batch.ops()[1].target(), (Collection::Screams, "s1"));
    }
}
