//! Concrete [`DocumentStore`](screams_core::traits::DocumentStore) backends.

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
