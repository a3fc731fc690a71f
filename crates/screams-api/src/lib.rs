//! # screams-api
//!
//! HTTP API layer for Screams built on Axum.
//!
//! Provides the REST endpoints, the bearer-token extractor, middleware
//! (request logging, CORS), DTOs and error mapping, plus the
//! [`Application`] builder that wires the store, services and trigger
//! runner together from configuration.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Application, build_app};
pub use error::ApiError;
pub use state::AppState;
