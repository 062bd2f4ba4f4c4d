//! Asynchronous package-management tasks.
//!
//! Installing, uninstalling and listing packages all go through the device's
//! task collection: an operation is submitted with a `POST`, the device
//! answers with a task id, and the task resource is polled until it reaches
//! a terminal state.
//!
//! ```text
//! TaskClient::submit_and_wait
//!         │
//!         ├── POST /mgmt/shared/iapp/package-management-tasks      → { id }
//!         │
//!         └── poll_until(PollPolicy)                                 (poll)
//!                 └── GET  .../package-management-tasks/{id}       → { status }
//! ```

mod client;
mod error;
mod poll;
mod types;

pub use client::{TaskClient, PACKAGE_TASKS_URI};
pub use error::{TaskError, TaskResult};
pub use poll::{poll_until, PollOutcome, PollPolicy, PollStep, DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL};
pub use types::{TaskOperation, TaskState, TaskStatus};
