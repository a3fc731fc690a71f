//! Convenience result type alias for Screams.

use crate::error::AppError;

/// A specialized `Result` type for Screams operations.
pub type AppResult<T> = Result<T, AppError>;
