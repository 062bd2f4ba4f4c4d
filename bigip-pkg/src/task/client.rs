//! Submits package tasks and waits for them to finish.

use serde_json::Value;
use tracing::{debug, info};

use super::error::{TaskError, TaskResult};
use super::poll::{poll_until, PollOutcome, PollPolicy, PollStep};
use super::types::{TaskOperation, TaskState, TaskStatus};
use crate::transport::{ApiRequest, Transport};

/// Collection endpoint for package-management tasks.
pub const PACKAGE_TASKS_URI: &str = "/mgmt/shared/iapp/package-management-tasks";

/// Client for the package-management task collection.
pub struct TaskClient<T: Transport> {
    transport: T,
    policy: PollPolicy,
}

impl<T: Transport> TaskClient<T> {
    /// Create a client with the given poll policy.
    pub fn new(transport: T, policy: PollPolicy) -> Self {
        Self { transport, policy }
    }

    /// The poll policy in use.
    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Submit an operation and return the new task's id.
    pub fn submit(&self, operation: &TaskOperation) -> TaskResult<String> {
        let body = serde_json::to_value(operation)
            .map_err(|e| TaskError::MalformedResponse(format!("unserializable operation: {}", e)))?;

        let response = self
            .transport
            .request(ApiRequest::post_json(PACKAGE_TASKS_URI, body))?;

        let id = response
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                TaskError::MalformedResponse(format!(
                    "{} submission returned no task id",
                    operation.name()
                ))
            })?
            .to_string();

        info!(operation = operation.name(), task_id = %id, "Task submitted");
        Ok(id)
    }

    /// Poll a task until it finishes, fails, or the poll ceiling is reached.
    ///
    /// Returns the full task resource of the FINISHED response.
    pub fn wait(&self, task_id: &str) -> TaskResult<Value> {
        let uri = format!("{}/{}", PACKAGE_TASKS_URI, task_id);
        debug!(task_id, max_wait = ?self.policy.max_wait(), "Waiting for task");

        let outcome = poll_until(&self.policy, |attempt| -> TaskResult<_> {
            let response = self.transport.request(ApiRequest::get(uri.as_str()))?;
            let state: TaskState = serde_json::from_value(response.clone()).map_err(|e| {
                TaskError::MalformedResponse(format!("task {} status: {}", task_id, e))
            })?;

            debug!(task_id, attempt, status = ?state.status, "Polled task");

            if !state.status.is_terminal() {
                return Ok(PollStep::Pending);
            }

            Ok(if state.status == TaskStatus::Finished {
                PollStep::Done(response)
            } else {
                PollStep::Fail(
                    state
                        .error_message
                        .unwrap_or_else(|| "no error message reported".to_string()),
                )
            })
        })?;

        match outcome {
            PollOutcome::Success(payload) => {
                info!(task_id, "Task finished");
                Ok(payload)
            }
            PollOutcome::Failed(message) => Err(TaskError::Failed {
                task_id: task_id.to_string(),
                message,
            }),
            PollOutcome::TimedOut { attempts } => Err(TaskError::Timeout {
                task_id: task_id.to_string(),
                attempts,
            }),
        }
    }

    /// Submit an operation and wait for its result.
    pub fn submit_and_wait(&self, operation: &TaskOperation) -> TaskResult<Value> {
        let task_id = self.submit(operation)?;
        self.wait(&task_id)
    }
}
