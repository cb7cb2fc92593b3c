//! Convenience result type alias for Zabaan.

use crate::error::AppError;

/// A specialized `Result` type for Zabaan operations.
pub type AppResult<T> = Result<T, AppError>;
