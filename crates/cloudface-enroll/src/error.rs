//! Enrollment error types.

use cloudface_client::ApiError;
use thiserror::Error;

/// Errors from enrollment and identification flows.
#[derive(Error, Debug)]
pub enum EnrollError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Group training failed: {0}")]
    Training(String),
}

impl EnrollError {
    pub fn training(msg: impl Into<String>) -> Self {
        Self::Training(msg.into())
    }

    /// Whether the underlying API call may succeed on a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            EnrollError::Api(e) => e.is_retryable(),
            EnrollError::Training(_) => false,
        }
    }
}

/// Result type for enrollment operations.
pub type EnrollResult<T> = Result<T, EnrollError>;
