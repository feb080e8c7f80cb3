//! Standard error types for consistent error handling across both portals.

use thiserror::Error;

/// Portal-wide error taxonomy.
///
/// Persistence failures are explicit errors rather than silently assumed
/// successes: a full quota or a corrupt document surfaces as [`PortalError::Storage`].
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Storage(err.to_string())
    }
}

pub type PortalResult<T> = Result<T, PortalError>;
