//! # screams-database
//!
//! Document store backends (in-memory and PostgreSQL JSONB), PostgreSQL
//! connection management, the [`DocumentDatabase`] facade that publishes
//! change events, and typed repositories for every Screams collection.

pub mod backend;
pub mod connection;
pub mod migration;
pub mod provider;
pub mod repositories;

pub use connection::DatabasePool;
pub use provider::DocumentDatabase;
