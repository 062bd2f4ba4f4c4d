//! Error types for task submission and polling.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type for task operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors that can occur while running a task.
///
/// `Failed` and `Timeout` are kept apart so callers can tell a genuine
/// failure from a device that is merely slow.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The device reported the task as FAILED.
    #[error("task {task_id} failed: {message}")]
    Failed { task_id: String, message: String },

    /// The task was still pending after the poll ceiling.
    #[error("task {task_id} did not finish after {attempts} polls")]
    Timeout { task_id: String, attempts: u32 },

    /// A task response was missing a required field.
    #[error("malformed task response: {0}")]
    MalformedResponse(String),

    /// A submit or poll request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_display() {
        let err = TaskError::Failed {
            task_id: "abc".to_string(),
            message: "Package f5-appsvcs is not installed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "task abc failed: Package f5-appsvcs is not installed"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = TaskError::Timeout {
            task_id: "abc".to_string(),
            attempts: 120,
        };
        assert!(err.to_string().contains("120 polls"));
    }
}
