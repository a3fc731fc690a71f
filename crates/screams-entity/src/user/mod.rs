//! User domain entities.

pub mod details;
pub mod model;

pub use details::UserDetails;
pub use model::User;
