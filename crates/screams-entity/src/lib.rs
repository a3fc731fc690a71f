//! # screams-entity
//!
//! Typed models for the documents Screams keeps in its store. Every struct
//! in this crate maps one-to-one onto a document in a single collection and
//! implements [`DocumentModel`] for conversion to and from the schemaless
//! [`Document`](screams_core::types::Document) representation. Field names
//! on the wire and in storage are camelCase.

pub mod comment;
pub mod credential;
pub mod like;
pub mod model;
pub mod notification;
pub mod scream;
pub mod user;

pub use comment::Comment;
pub use credential::Credential;
pub use like::Like;
pub use model::DocumentModel;
pub use notification::{Notification, NotificationType};
pub use scream::{Scream, ScreamWithComments};
pub use user::{User, UserDetails};
