//! Convenience result type alias for PMIS.

use crate::error::AppError;

/// A specialized `Result` type for PMIS operations.
pub type AppResult<T> = Result<T, AppError>;
