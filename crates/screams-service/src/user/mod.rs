//! Sign-up, login and profile operations.

pub mod service;
pub mod validation;

pub use service::{AuthToken, AuthenticatedUser, LoginInput, SignupInput, UserProfile, UserService};
