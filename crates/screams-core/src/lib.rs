//! # screams-core
//!
//! Core crate for Screams. Contains the configuration schema, document
//! store abstractions (documents, queries, write batches and the
//! [`DocumentStore`](traits::DocumentStore) trait), document change events
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Screams crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
