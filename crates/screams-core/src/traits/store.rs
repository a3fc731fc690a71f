//! Document store trait for pluggable persistence backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{Collection, Document, DocumentChange, Fields, Query, WriteBatch};

/// A schemaless document store (in-memory or PostgreSQL).
///
/// Every write returns the [`DocumentChange`]s it produced so the caller can
/// publish them as events. Backends never publish on their own.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a document by id.
    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>>;

    /// Insert a new document. A generated id is used when `id` is `None`.
    ///
    /// Fails with `Conflict` if the id is already taken.
    async fn create(
        &self,
        collection: Collection,
        id: Option<&str>,
        data: Fields,
    ) -> AppResult<DocumentChange>;

    /// Insert or fully replace a document.
    async fn set(&self, collection: Collection, id: &str, data: Fields)
    -> AppResult<DocumentChange>;

    /// Shallow-merge `fields` into an existing document.
    ///
    /// Fails with `NotFound` if the document does not exist.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> AppResult<DocumentChange>;

    /// Atomically add `delta` to an integer field, never going below zero.
    ///
    /// Fails with `NotFound` if the document does not exist.
    async fn increment(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        delta: i64,
    ) -> AppResult<DocumentChange>;

    /// Remove a document. Deleting a missing document is a no-op.
    async fn delete(&self, collection: Collection, id: &str) -> AppResult<DocumentChange>;

    /// Run an equality-filter query.
    async fn query(&self, query: &Query) -> AppResult<Vec<Document>>;

    /// Apply every write in `batch` or none of them.
    async fn commit(&self, batch: WriteBatch) -> AppResult<Vec<DocumentChange>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Backend name for logs and health output.
    fn provider_name(&self) -> &str;
}
