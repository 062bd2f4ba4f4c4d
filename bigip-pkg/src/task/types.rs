//! Wire types for the package-management task collection.

use serde::{Deserialize, Serialize};

/// An operation submitted to the task collection.
///
/// Serializes to the body the device expects, e.g.
/// `{"operation": "INSTALL", "packageFilePath": "/var/config/rest/downloads/x.rpm"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "UPPERCASE")]
pub enum TaskOperation {
    /// Install an RPM already uploaded to the device.
    Install {
        #[serde(rename = "packageFilePath")]
        package_file_path: String,
    },
    /// Uninstall an installed package by name.
    Uninstall {
        #[serde(rename = "packageName")]
        package_name: String,
    },
    /// List installed packages.
    Query,
}

impl TaskOperation {
    /// Operation name as sent on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Install { .. } => "INSTALL",
            Self::Uninstall { .. } => "UNINSTALL",
            Self::Query => "QUERY",
        }
    }
}

/// Status of a task as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Created,
    Pending,
    Started,
    Running,
    Finished,
    Failed,
    /// Any status this client does not know; treated as still in progress.
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Whether the task has stopped changing.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }
}

/// The fields of a task resource this client acts on.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskState {
    /// Current status.
    pub status: TaskStatus,
    /// Error reported by the device for FAILED tasks.
    #[serde(default, rename = "errorMessage")]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_install_body() {
        let op = TaskOperation::Install {
            package_file_path: "/var/config/rest/downloads/f5-appsvcs-3.20.0-3.noarch.rpm"
                .to_string(),
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "operation": "INSTALL",
                "packageFilePath": "/var/config/rest/downloads/f5-appsvcs-3.20.0-3.noarch.rpm"
            })
        );
    }

    #[test]
    fn test_uninstall_body() {
        let op = TaskOperation::Uninstall {
            package_name: "f5-appsvcs-3.20.0-3.noarch".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"operation": "UNINSTALL", "packageName": "f5-appsvcs-3.20.0-3.noarch"})
        );
    }

    #[test]
    fn test_query_body() {
        assert_eq!(
            serde_json::to_value(TaskOperation::Query).unwrap(),
            json!({"operation": "QUERY"})
        );
        assert_eq!(TaskOperation::Query.name(), "QUERY");
    }

    #[test]
    fn test_status_parsing() {
        let state: TaskState = serde_json::from_value(json!({
            "id": "1234",
            "status": "FAILED",
            "errorMessage": "Failed to install"
        }))
        .unwrap();
        assert_eq!(state.status, TaskStatus::Failed);
        assert!(state.status.is_terminal());
        assert_eq!(state.error_message.as_deref(), Some("Failed to install"));
    }

    #[test]
    fn test_state_ignores_id_shape() {
        let state: TaskState =
            serde_json::from_value(json!({"id": 42, "status": "RUNNING"})).unwrap();
        assert_eq!(state.status, TaskStatus::Running);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_unknown_status_is_not_terminal() {
        let state: TaskState =
            serde_json::from_value(json!({"status": "WAITING_FOR_REBOOT"})).unwrap();
        assert_eq!(state.status, TaskStatus::Unknown);
        assert!(!state.status.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
    }
}
