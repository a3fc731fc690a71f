//! Scream, comment and like operations.

pub mod service;

pub use service::ScreamService;
