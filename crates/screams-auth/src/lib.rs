//! # screams-auth
//!
//! Authentication for Screams.
//!
//! ## Modules
//!
//! - `jwt`: bearer token issuing and validation
//! - `password`: Argon2id password hashing
//! - `identity`: resolving a bearer token to the calling user

pub mod identity;
pub mod jwt;
pub mod password;

pub use identity::{Identity, IdentityGate};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
