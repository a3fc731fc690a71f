//! Core traits defined in `screams-core` and implemented by other crates.

pub mod store;

pub use store::DocumentStore;
