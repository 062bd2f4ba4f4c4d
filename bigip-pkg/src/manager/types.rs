//! Progress and result types for lifecycle operations.

use serde::Serialize;

/// Stages of an install, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    /// Resolving version, URL and package name from metadata.
    Resolving,
    /// Downloading the RPM locally.
    Downloading,
    /// Uploading the RPM to the device.
    Uploading,
    /// Submitting the INSTALL task.
    Submitting,
    /// Waiting for the task to finish.
    Polling,
    /// Installation complete.
    Complete,
}

impl InstallStage {
    /// Get a human-readable name for the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolving => "Resolving",
            Self::Downloading => "Downloading",
            Self::Uploading => "Uploading",
            Self::Submitting => "Submitting",
            Self::Polling => "Waiting for device",
            Self::Complete => "Complete",
        }
    }
}

/// Callback invoked as each install stage starts.
pub type InstallProgressCallback = Box<dyn Fn(InstallStage, &str) + Send + Sync>;

/// Outcome of a successful install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub component: String,
    pub version: String,
}

/// A dependent component that may break once this one is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyWarning {
    /// Name of the dependent component.
    pub dependent: String,
    /// Where to read about removing the dependent.
    pub documentation: String,
}

/// Outcome of a successful uninstall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UninstallResult {
    pub component: String,
    pub version: String,
    /// Non-fatal dependency warnings raised after removal.
    pub warnings: Vec<DependencyWarning>,
}

/// Installed state of a component on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallStatus {
    pub component: String,
    pub installed: bool,
    /// Version found on the device, when exactly one package matched.
    pub installed_version: Option<String>,
    /// Version metadata flags as latest.
    pub latest_version: String,
}

impl InstallStatus {
    /// Whether an installed component is behind the latest version.
    pub fn is_outdated(&self) -> bool {
        match &self.installed_version {
            Some(installed) => installed != &self.latest_version,
            None => false,
        }
    }
}
