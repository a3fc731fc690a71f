//! # screams-triggers
//!
//! Reactions to committed document writes. Every write published on the
//! event bus is matched against the registry by `(collection, change kind)`
//! and handed to each subscribed [`TriggerHandler`]. Handlers are best
//! effort: failures are logged and dropped, never retried.
//!
//! ## Handlers
//!
//! - `likes` created → notify the scream author
//! - `comments` created → notify the scream author
//! - `likes` deleted → remove the like's notification
//! - `screams` deleted → remove its comments, likes and notifications
//! - `users` updated → copy a changed image onto the user's screams

pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod runner;

pub use dispatcher::{DispatchReport, TriggerDispatcher};
pub use handler::{TriggerHandler, TriggerPoint};
pub use registry::TriggerRegistry;
pub use runner::TriggerRunner;
