//! PostgreSQL document store on a single JSONB table.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnection, PgPool, Postgres};
use sqlx::QueryBuilder;
use tracing::debug;

use screams_core::error::{AppError, ErrorKind};
use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{
    Collection, Direction, Document, DocumentChange, Fields, Query, WriteBatch, WriteOp,
    generate_document_id,
};

/// Document store backed by the `documents(collection, id, data)` table.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn apply_single(&self, op: WriteOp) -> AppResult<DocumentChange> {
        let mut tx = self.pool.begin().await.map_err(db_err("Failed to begin transaction"))?;
        let change = apply_op(&mut tx, &op).await?;
        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;
        Ok(change)
    }
}

fn db_err(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

fn into_fields(collection: Collection, id: &str, value: Value) -> AppResult<Fields> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::new(
            ErrorKind::Serialization,
            format!("Document '{collection}/{id}' is not a JSON object"),
        )),
    }
}

/// Quote a document field name as a SQL string literal.
///
/// Field names end up in the statement text so the planner can match the
/// expression indexes; only `[A-Za-z0-9_]` is accepted.
fn field_literal(field: &str) -> AppResult<String> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::database(format!("Invalid document field name '{field}'")));
    }
    Ok(format!("'{field}'"))
}

/// Build the `SELECT` for a query.
///
/// Equality filters become `data @> {field: value}` (served by the GIN index
/// on `data`). Ordering sorts numbers by value, then every value by its
/// text form bytewise; for `createdAt` the expression is the one indexed
/// by `idx_documents_created_at`.
fn build_select(query: &Query) -> AppResult<QueryBuilder<'static, Postgres>> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT id, data FROM documents WHERE collection = ");
    builder.push_bind(query.collection.as_str());

    for filter in &query.filters {
        let mut containment = Fields::new();
        containment.insert(filter.field.clone(), filter.value.clone());
        builder.push(" AND data @> ").push_bind(Value::Object(containment));
    }

    if let Some(order) = &query.order_by {
        let field = field_literal(&order.field)?;
        let dir = match order.direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        builder.push(format!(
            " ORDER BY (CASE WHEN jsonb_typeof(data -> {field}) = 'number' \
             THEN (data ->> {field})::numeric END) {dir}, \
             ((data ->> {field}) COLLATE \"C\") {dir}"
        ));
    }

    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(limit as i64);
    }

    Ok(builder)
}

/// Read a row and lock it for the rest of the transaction.
async fn lock_row(
    conn: &mut PgConnection,
    collection: Collection,
    id: &str,
) -> AppResult<Option<Document>> {
    let data: Option<Value> = sqlx::query_scalar(
        "SELECT data FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE",
    )
    .bind(collection.as_str())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_err("Failed to lock document"))?;

    data.map(|v| into_fields(collection, id, v).map(|f| Document::new(id, f)))
        .transpose()
}

/// Apply one write inside an open transaction.
async fn apply_op(conn: &mut PgConnection, op: &WriteOp) -> AppResult<DocumentChange> {
    let (collection, id) = op.target();

    match op {
        WriteOp::Create { data, .. } => {
            let inserted: Option<String> = sqlx::query_scalar(
                "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
                 ON CONFLICT (collection, id) DO NOTHING RETURNING id",
            )
            .bind(collection.as_str())
            .bind(id)
            .bind(Value::Object(data.clone()))
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_err("Failed to create document"))?;

            if inserted.is_none() {
                return Err(AppError::conflict(format!(
                    "Document '{collection}/{id}' already exists"
                )));
            }
            Ok(DocumentChange::new(
                collection,
                id,
                None,
                Some(Document::new(id, data.clone())),
            ))
        }
        WriteOp::Set { data, .. } => {
            let before = lock_row(conn, collection, id).await?;
            sqlx::query(
                "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
                 ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()",
            )
            .bind(collection.as_str())
            .bind(id)
            .bind(Value::Object(data.clone()))
            .execute(&mut *conn)
            .await
            .map_err(db_err("Failed to set document"))?;

            Ok(DocumentChange::new(
                collection,
                id,
                before,
                Some(Document::new(id, data.clone())),
            ))
        }
        WriteOp::Update { fields, .. } => {
            let before = lock_row(conn, collection, id).await?.ok_or_else(|| {
                AppError::not_found(format!("Document '{collection}/{id}' not found"))
            })?;
            let data: Value = sqlx::query_scalar(
                "UPDATE documents SET data = data || $3, updated_at = NOW() \
                 WHERE collection = $1 AND id = $2 RETURNING data",
            )
            .bind(collection.as_str())
            .bind(id)
            .bind(Value::Object(fields.clone()))
            .fetch_one(&mut *conn)
            .await
            .map_err(db_err("Failed to update document"))?;

            let after = Document::new(id, into_fields(collection, id, data)?);
            Ok(DocumentChange::new(collection, id, Some(before), Some(after)))
        }
        WriteOp::Delete { .. } => {
            let data: Option<Value> = sqlx::query_scalar(
                "DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING data",
            )
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_err("Failed to delete document"))?;

            let before = data
                .map(|v| into_fields(collection, id, v).map(|f| Document::new(id, f)))
                .transpose()?;
            Ok(DocumentChange::new(collection, id, before, None))
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>> {
        let data: Option<Value> =
            sqlx::query_scalar("SELECT data FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection.as_str())
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err("Failed to fetch document"))?;

        data.map(|v| into_fields(collection, id, v).map(|f| Document::new(id, f)))
            .transpose()
    }

    async fn create(
        &self,
        collection: Collection,
        id: Option<&str>,
        data: Fields,
    ) -> AppResult<DocumentChange> {
        let id = id.map_or_else(generate_document_id, str::to_string);
        self.apply_single(WriteOp::Create {
            collection,
            id,
            data,
        })
        .await
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
    ) -> AppResult<DocumentChange> {
        self.apply_single(WriteOp::Set {
            collection,
            id: id.to_string(),
            data,
        })
        .await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> AppResult<DocumentChange> {
        self.apply_single(WriteOp::Update {
            collection,
            id: id.to_string(),
            fields,
        })
        .await
    }

    async fn increment(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        delta: i64,
    ) -> AppResult<DocumentChange> {
        let mut tx = self.pool.begin().await.map_err(db_err("Failed to begin transaction"))?;

        let before = lock_row(&mut tx, collection, id).await?.ok_or_else(|| {
            AppError::not_found(format!("Document '{collection}/{id}' not found"))
        })?;

        let data: Value = sqlx::query_scalar(
            "UPDATE documents SET data = jsonb_set(data, ARRAY[$3::text], \
             to_jsonb(GREATEST(0, COALESCE((data ->> $3)::bigint, 0) + $4)), true), \
             updated_at = NOW() \
             WHERE collection = $1 AND id = $2 RETURNING data",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(field)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err("Failed to increment counter"))?;

        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;

        debug!(%collection, id, field, delta, "Incremented counter");
        let after = Document::new(id, into_fields(collection, id, data)?);
        Ok(DocumentChange::new(collection, id, Some(before), Some(after)))
    }

    async fn delete(&self, collection: Collection, id: &str) -> AppResult<DocumentChange> {
        self.apply_single(WriteOp::Delete {
            collection,
            id: id.to_string(),
        })
        .await
    }

    async fn query(&self, query: &Query) -> AppResult<Vec<Document>> {
        let mut builder = build_select(query)?;

        let rows: Vec<(String, Value)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to query documents"))?;

        rows.into_iter()
            .map(|(id, data)| {
                let fields = into_fields(query.collection, &id, data)?;
                Ok(Document::new(id, fields))
            })
            .collect()
    }

    async fn commit(&self, batch: WriteBatch) -> AppResult<Vec<DocumentChange>> {
        let mut tx = self.pool.begin().await.map_err(db_err("Failed to begin transaction"))?;

        let mut changes = Vec::with_capacity(batch.len());
        for op in batch.ops() {
            changes.push(apply_op(&mut tx, op).await?);
        }

        tx.commit().await.map_err(db_err("Failed to commit batch"))?;
        debug!(ops = changes.len(), "Committed write batch");
        Ok(changes)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(db_err("Health check failed"))
    }

    fn provider_name(&self) -> &str {
        "postgres"
    }
}
