//! Document database facade that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use screams_core::config::{StoreConfig, StoreProvider};
use screams_core::events::EventBus;
use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{Collection, Document, DocumentChange, Fields, Query, WriteBatch};

use crate::backend::{MemoryDocumentStore, PostgresDocumentStore};
use crate::connection::DatabasePool;
use crate::migration::run_migrations;

/// Document store wrapper used by every repository.
///
/// The backend is selected at construction time from configuration. Each
/// effective write is published on the [`EventBus`] after it commits.
#[derive(Debug, Clone)]
pub struct DocumentDatabase {
    inner: Arc<dyn DocumentStore>,
    events: EventBus,
}

impl DocumentDatabase {
    /// Create a database from configuration, connecting and migrating if needed.
    pub async fn new(config: &StoreConfig, events: EventBus) -> AppResult<Self> {
        let inner: Arc<dyn DocumentStore> = match config.provider {
            StoreProvider::Memory => {
                info!("Initializing in-memory document store");
                Arc::new(MemoryDocumentStore::new())
            }
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL document store");
                let pool = DatabasePool::connect(&config.postgres).await?;
                if config.postgres.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Arc::new(PostgresDocumentStore::new(pool.into_pool()))
            }
        };

        Ok(Self { inner, events })
    }

    /// Create a database over an existing backend (for testing).
    pub fn from_store(store: Arc<dyn DocumentStore>, events: EventBus) -> Self {
        Self {
            inner: store,
            events,
        }
    }

    /// Create an in-memory database.
    pub fn in_memory(events: EventBus) -> Self {
        Self::from_store(Arc::new(MemoryDocumentStore::new()), events)
    }

    fn publish(&self, change: &DocumentChange) {
        self.events.publish_changes(std::slice::from_ref(change));
    }
}

#[async_trait]
impl DocumentStore for DocumentDatabase {
    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn create(
        &self,
        collection: Collection,
        id: Option<&str>,
        data: Fields,
    ) -> AppResult<DocumentChange> {
        let change = self.inner.create(collection, id, data).await?;
        self.publish(&change);
        Ok(change)
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
    ) -> AppResult<DocumentChange> {
        let change = self.inner.set(collection, id, data).await?;
        self.publish(&change);
        Ok(change)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> AppResult<DocumentChange> {
        let change = self.inner.update(collection, id, fields).await?;
        self.publish(&change);
        Ok(change)
    }

    async fn increment(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        delta: i64,
    ) -> AppResult<DocumentChange> {
        let change = self.inner.increment(collection, id, field, delta).await?;
        self.publish(&change);
        Ok(change)
    }

    async fn delete(&self, collection: Collection, id: &str) -> AppResult<DocumentChange> {
        let change = self.inner.delete(collection, id).await?;
        self.publish(&change);
        Ok(change)
    }

    async fn query(&self, query: &Query) -> AppResult<Vec<Document>> {
        self.inner.query(query).await
    }

    async fn commit(&self, batch: WriteBatch) -> AppResult<Vec<DocumentChange>> {
        let changes = self.inner.commit(batch).await?;
        self.events.publish_changes(&changes);
        Ok(changes)
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
