//! Package lifecycle management.
//!
//! The [`PackageManager`] ties the other modules together into the three
//! operations a user cares about:
//!
//! ```text
//! install    resolve → download → upload → INSTALL task → poll
//! uninstall  resolve → UNINSTALL task → poll → dependency check
//! status     QUERY task → poll → match package names
//! ```
//!
//! Each step's error is propagated unchanged inside [`ManagerError`]; nothing
//! is retried.

mod config;
mod error;
mod lifecycle;
mod types;

pub use config::{ManagerConfig, DEFAULT_REMOTE_DOWNLOAD_DIR};
pub use error::{ManagerError, ManagerResult};
pub use lifecycle::PackageManager;
pub use types::{
    DependencyWarning, InstallProgressCallback, InstallStage, InstallStatus, OperationResult,
    UninstallResult,
};
