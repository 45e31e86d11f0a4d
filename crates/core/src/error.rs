//! Core Error Types
//!
//! Error type shared by the lot dashboard workspace. Only thiserror + std,
//! so the core crate stays lightweight.
//!
//! Data-shape problems never become errors here; records are coerced
//! leniently. What remains is a violated precondition on the input handed
//! to a pipeline stage. The application crate wraps this in its own
//! `AppError`, adding variants for configuration files, payload sources and
//! HTTP.

use thiserror::Error;

/// Core error type for record handling and normalization.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A precondition on the input was violated
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
