//! Typed repositories for every Screams collection.

pub mod comment;
pub mod credential;
pub mod like;
pub mod notification;
pub mod scream;
pub mod user;

pub use comment::CommentRepository;
pub use credential::CredentialRepository;
pub use like::LikeRepository;
pub use notification::NotificationRepository;
pub use scream::ScreamRepository;
pub use user::UserRepository;

use screams_core::error::AppError;
use screams_core::result::AppResult;
use screams_core::traits::DocumentStore;
use screams_core::types::{DocumentChange, Query};
use screams_entity::DocumentModel;

use crate::provider::DocumentDatabase;

/// Load one model by id.
async fn fetch<M: DocumentModel>(db: &DocumentDatabase, id: &str) -> AppResult<Option<M>> {
    db.get(M::COLLECTION, id)
        .await?
        .map(M::from_document)
        .transpose()
}

/// Run a query and decode every hit.
async fn fetch_all<M: DocumentModel>(db: &DocumentDatabase, query: &Query) -> AppResult<Vec<M>> {
    M::from_documents(db.query(query).await?)
}

/// Decode the post-write snapshot of a change.
fn decode_after<M: DocumentModel>(change: DocumentChange) -> AppResult<M> {
    let DocumentChange { collection, id, after, .. } = change;
    let doc = after.ok_or_else(|| {
        AppError::internal(format!("Write to '{collection}/{id}' left no document"))
    })?;
    M::from_document(doc)
}
