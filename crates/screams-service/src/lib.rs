//! # screams-service
//!
//! Business logic for Screams. Each service orchestrates repositories and
//! authentication to implement one group of use cases. Every operation is a
//! short sequence of document reads and writes; earlier writes are not
//! rolled back when a later step fails.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod notification;
pub mod scream;
pub mod user;

pub use context::RequestContext;
pub use notification::NotificationService;
pub use scream::ScreamService;
pub use user::UserService;
