//! In-process document store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use screams_core::error::AppError;
use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{
    Collection, Document, DocumentChange, Fields, Query, WriteBatch, WriteOp,
    generate_document_id,
};

type Table = BTreeMap<String, Fields>;

/// Document store held entirely in memory behind a single lock.
///
/// Every operation takes the lock once, so single-document writes,
/// increments and batch commits are atomic with respect to each other.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Table>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, BTreeMap::len)
    }
}

/// Resolve one batch operation against the current view of the data.
///
/// Returns the change it would make, without applying it.
fn plan_op(current: Option<&Fields>, op: &WriteOp) -> AppResult<DocumentChange> {
    let (collection, id) = op.target();
    let before = current.map(|data| Document::new(id, data.clone()));

    let after = match op {
        WriteOp::Create { data, .. } => {
            if before.is_some() {
                return Err(AppError::conflict(format!(
                    "Document '{collection}/{id}' already exists"
                )));
            }
            Some(Document::new(id, data.clone()))
        }
        WriteOp::Set { data, .. } => Some(Document::new(id, data.clone())),
        WriteOp::Update { fields, .. } => {
            let mut doc = before.clone().ok_or_else(|| {
                AppError::not_found(format!("Document '{collection}/{id}' not found"))
            })?;
            doc.merge(fields);
            Some(doc)
        }
        WriteOp::Delete { .. } => None,
    };

    Ok(DocumentChange::new(collection, id, before, after))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|table| table.get(id))
            .map(|data| Document::new(id, data.clone())))
    }

    async fn create(
        &self,
        collection: Collection,
        id: Option<&str>,
        data: Fields,
    ) -> AppResult<DocumentChange> {
        let id = id.map_or_else(generate_document_id, str::to_string);
        let mut batch = WriteBatch::new();
        batch.create(collection, id, data);
        single(self.commit(batch).await?)
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
    ) -> AppResult<DocumentChange> {
        let mut batch = WriteBatch::new();
        batch.set(collection, id, data);
        single(self.commit(batch).await?)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> AppResult<DocumentChange> {
        let mut batch = WriteBatch::new();
        batch.update(collection, id, fields);
        single(self.commit(batch).await?)
    }

    async fn increment(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        delta: i64,
    ) -> AppResult<DocumentChange> {
        let mut guard = self.collections.write().await;
        let data = guard
            .get_mut(&collection)
            .and_then(|table| table.get_mut(id))
            .ok_or_else(|| AppError::not_found(format!("Document '{collection}/{id}' not found")))?;

        let before = Document::new(id, data.clone());
        let mut after = before.clone();
        let value = after.increment(field, delta);
        *data = after.data.clone();

        debug!(%collection, id, field, delta, value, "Incremented counter");
        Ok(DocumentChange::new(collection, id, Some(before), Some(after)))
    }

    async fn delete(&self, collection: Collection, id: &str) -> AppResult<DocumentChange> {
        let mut batch = WriteBatch::new();
        batch.delete(collection, id);
        single(self.commit(batch).await?)
    }

    async fn query(&self, query: &Query) -> AppResult<Vec<Document>> {
        let guard = self.collections.read().await;
        let candidates = guard
            .get(&query.collection)
            .into_iter()
            .flat_map(|table| table.iter())
            .map(|(id, data)| Document::new(id.clone(), data.clone()));
        Ok(query.apply(candidates))
    }

    async fn commit(&self, batch: WriteBatch) -> AppResult<Vec<DocumentChange>> {
        let mut guard = self.collections.write().await;

        // Plan every operation against a staged overlay first; nothing is
        // applied unless the whole batch is valid.
        let mut staged: HashMap<(Collection, String), Option<Fields>> = HashMap::new();
        let mut changes = Vec::with_capacity(batch.len());

        for op in batch.ops() {
            let (collection, id) = op.target();
            let key = (collection, id.to_string());
            let current = match staged.get(&key) {
                Some(staged) => staged.clone(),
                None => guard.get(&collection).and_then(|t| t.get(id)).cloned(),
            };
            let change = plan_op(current.as_ref(), op)?;
            staged.insert(key, change.after.as_ref().map(|d| d.data.clone()));
            changes.push(change);
        }

        for ((collection, id), data) in staged {
            let table = guard.entry(collection).or_default();
            match data {
                Some(data) => {
                    table.insert(id, data);
                }
                None => {
                    table.remove(&id);
                }
            }
        }

        Ok(changes)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

fn single(mut changes: Vec<DocumentChange>) -> AppResult<DocumentChange> {
    changes
        .pop()
        .ok_or_else(|| AppError::internal("Write produced no change record"))
}
