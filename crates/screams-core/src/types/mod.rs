//! Store-level value types shared across crates.

pub mod batch;
pub mod collection;
pub mod document;
pub mod query;
pub mod timestamp;

pub use batch::{WriteBatch, WriteOp};
pub use collection::Collection;
pub use document::{ChangeKind, Document, DocumentChange, Fields, generate_document_id};
pub use query::{Direction, Filter, OrderBy, Query};
