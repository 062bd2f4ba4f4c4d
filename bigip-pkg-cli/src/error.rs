//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use bigip_pkg::config::ConfigFileError;
use bigip_pkg::manager::ManagerError;
use bigip_pkg::task::TaskError;
use bigip_pkg::transport::TransportError;
use bigip_pkg::upload::UploadError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Could not set up the device connection
    Device(String),
    /// A package operation failed
    Package(ManagerError),
    /// Failed to render output
    Output(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Package(e) = self {
            match (transport_error(e), e) {
                (Some(t), _) if is_auth_failure(t) => {
                    eprintln!();
                    eprintln!("The device rejected the credentials. Check:");
                    eprintln!("  1. --user / --password (or BIGIP_PASSWORD)");
                    eprintln!("  2. --token (or BIGIP_TOKEN) has not expired");
                }
                (Some(TransportError::Connection { .. }), _) => {
                    eprintln!();
                    eprintln!("Could not reach the device. Check:");
                    eprintln!("  1. --host points at the management address");
                    eprintln!("  2. The management port (usually 443) is reachable");
                }
                (_, ManagerError::Task(TaskError::Timeout { .. })) => {
                    eprintln!();
                    eprintln!("The task may still finish on the device.");
                    eprintln!("Use 'bigip-pkg status <component>' to check later.");
                }
                _ => {}
            }
        }

        process::exit(1)
    }
}

/// Whether the device refused our credentials.
fn is_auth_failure(e: &TransportError) -> bool {
    matches!(e, TransportError::Auth(_)) || e.status() == Some(401)
}

/// The transport failure underneath a manager error, if any.
fn transport_error(e: &ManagerError) -> Option<&TransportError> {
    match e {
        ManagerError::Task(TaskError::Transport(t))
        | ManagerError::Upload(UploadError::Transport(t)) => Some(t),
        _ => None,
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Device(msg) => write!(f, "Device connection error: {}", msg),
            CliError::Package(e) => write!(f, "{}", e),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Package(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ManagerError> for CliError {
    fn from(e: ManagerError) -> Self {
        CliError::Package(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_is_found_through_task() {
        let err = ManagerError::Task(TaskError::Transport(TransportError::Auth(
            "bad token".to_string(),
        )));
        assert!(matches!(
            transport_error(&err),
            Some(TransportError::Auth(_))
        ));
    }

    #[test]
    fn test_auth_failure_detection() {
        let unauthorized = TransportError::Status {
            method: "GET".to_string(),
            uri: "/mgmt/shared/iapp/package-management-tasks/t".to_string(),
            status: 401,
            body: String::new(),
        };
        let bad_request = TransportError::Status {
            method: "POST".to_string(),
            uri: "/mgmt/shared/iapp/package-management-tasks".to_string(),
            status: 400,
            body: String::new(),
        };
        assert!(is_auth_failure(&unauthorized));
        assert!(is_auth_failure(&TransportError::Auth("expired".to_string())));
        assert!(!is_auth_failure(&bad_request));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CliError::Config("no host".to_string()).to_string(),
            "Configuration error: no host"
        );
        assert_eq!(
            CliError::Device("no route".to_string()).to_string(),
            "Device connection error: no route"
        );
    }
}
