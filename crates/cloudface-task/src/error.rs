//! Task error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// The job returned an error; the payload is its display form.
    #[error("task failed: {0}")]
    Failed(String),

    /// The job panicked or was torn down before completing.
    #[error("task panicked: {0}")]
    Panicked(String),
}

impl TaskError {
    /// The message callers show to users, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            TaskError::Failed(msg) => msg,
            TaskError::Panicked(msg) => msg,
        }
    }
}
