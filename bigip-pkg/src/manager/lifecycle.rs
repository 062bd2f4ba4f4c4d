//! The package manager: install, uninstall and status queries.

use std::fs;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::config::ManagerConfig;
use super::error::{ManagerError, ManagerResult};
use super::types::{
    DependencyWarning, InstallProgressCallback, InstallStage, InstallStatus, OperationResult,
    UninstallResult,
};
use crate::download::Downloader;
use crate::metadata::{ComponentInfo, MetadataCatalog, MetadataProvider, VersionSpec};
use crate::task::{TaskClient, TaskOperation};
use crate::transport::Transport;
use crate::upload::ChunkedUploader;
use crate::version::extract_version;

/// Manages extension packages on one device.
///
/// Operations are blocking and run their steps strictly in sequence. The
/// manager holds no state between calls beyond its configuration.
pub struct PackageManager<T: Transport, M: MetadataProvider, D: Downloader> {
    transport: T,
    metadata: M,
    downloader: D,
    config: ManagerConfig,
}

impl<T: Transport, M: MetadataProvider, D: Downloader> PackageManager<T, M, D> {
    /// Create a package manager.
    pub fn new(transport: T, metadata: M, downloader: D, config: ManagerConfig) -> Self {
        Self {
            transport,
            metadata,
            downloader,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The metadata provider in use.
    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    fn tasks(&self) -> TaskClient<&T> {
        TaskClient::new(&self.transport, self.config.poll)
    }

    /// Install a component version.
    pub fn install(&self, component: &str, version: &VersionSpec) -> ManagerResult<OperationResult> {
        self.install_with_progress(component, version, None)
    }

    /// Install a component version, reporting each stage as it starts.
    ///
    /// Steps: resolve metadata, download the RPM to `temp_dir`, upload it in
    /// chunks, submit an INSTALL task for the uploaded file and poll it to
    /// completion. The first failing step aborts the install.
    pub fn install_with_progress(
        &self,
        component: &str,
        version: &VersionSpec,
        on_progress: Option<InstallProgressCallback>,
    ) -> ManagerResult<OperationResult> {
        let report = |stage: InstallStage, message: &str| {
            if let Some(ref cb) = on_progress {
                cb(stage, message);
            }
        };

        // Stage 1: Resolve
        report(
            InstallStage::Resolving,
            &format!("Resolving {} {}", component, version),
        );
        let package = self.metadata.resolve(component, version)?;
        let file_name = package.artifact_name();
        if file_name.is_empty() {
            return Err(ManagerError::InvalidDownloadUrl(package.download_url.clone()));
        }
        info!(
            component,
            version = %package.version,
            package = %package.package_name,
            "Installing package"
        );

        // Stage 2: Download
        fs::create_dir_all(&self.config.temp_dir).map_err(|source| {
            ManagerError::CreateDirFailed {
                path: self.config.temp_dir.clone(),
                source,
            }
        })?;
        let local_path = self.config.temp_dir.join(file_name);
        report(
            InstallStage::Downloading,
            &format!("Downloading {}", file_name),
        );
        let bytes = self.downloader.fetch(
            &package.download_url,
            &local_path,
            package.checksum.as_deref(),
        )?;
        debug!(path = %local_path.display(), bytes, "Package downloaded");

        // Stage 3: Upload
        report(
            InstallStage::Uploading,
            &format!("Uploading {} ({} bytes)", file_name, bytes),
        );
        let summary = ChunkedUploader::new(&self.transport, self.config.upload).upload(&local_path)?;

        // Stage 4: Submit INSTALL
        let package_file_path = self.config.remote_package_path(&summary.remote_name);
        report(
            InstallStage::Submitting,
            &format!("Installing {}", package_file_path),
        );
        let tasks = self.tasks();
        let task_id = tasks.submit(&TaskOperation::Install { package_file_path })?;

        // Stage 5: Poll
        report(
            InstallStage::Polling,
            &format!("Waiting for task {}", task_id),
        );
        tasks.wait(&task_id)?;

        report(
            InstallStage::Complete,
            &format!("Installed {} {}", component, package.version),
        );
        info!(component, version = %package.version, "Package installed");

        Ok(OperationResult {
            component: component.to_string(),
            version: package.version,
        })
    }

    /// Uninstall a component version.
    ///
    /// After the UNINSTALL task finishes, every component that declares a
    /// dependency on this one is checked. When all of a dependent's
    /// constraints hold for the removed version a warning is logged and
    /// returned; warnings never fail the uninstall.
    pub fn uninstall(&self, component: &str, version: &VersionSpec) -> ManagerResult<UninstallResult> {
        let version = self.metadata.resolve_version(component, version)?;
        let package_name = self.metadata.package_name(component, &version)?;

        info!(component, %version, package = %package_name, "Uninstalling package");
        self.tasks()
            .submit_and_wait(&TaskOperation::Uninstall { package_name })?;
        info!(component, %version, "Package uninstalled");

        let warnings = self.dependency_warnings(component, &version);

        Ok(UninstallResult {
            component: component.to_string(),
            version,
            warnings,
        })
    }

    fn dependency_warnings(&self, component: &str, version: &str) -> Vec<DependencyWarning> {
        let dependencies = match self.metadata.component_dependencies(component) {
            Ok(deps) => deps,
            Err(e) => {
                warn!(component, error = %e, "Could not check dependent components");
                return Vec::new();
            }
        };

        dependencies
            .into_iter()
            .filter(|dep| match dep.all_satisfied_by(version) {
                Ok(satisfied) => satisfied,
                Err(e) => {
                    warn!(component, dependent = %dep.name, error = %e, "Skipping dependency check");
                    false
                }
            })
            .map(|dep| {
                warn!(
                    component,
                    dependent = %dep.name,
                    documentation = %dep.uninstall_documentation,
                    "Dependent component may no longer work"
                );
                DependencyWarning {
                    dependent: dep.name,
                    documentation: dep.uninstall_documentation,
                }
            })
            .collect()
    }

    /// Query whether a component is installed and at which version.
    ///
    /// A device package matches when its name contains the component's
    /// package name. Only a single match with an `N.N.N` version in its
    /// name counts as installed; no match or several matches report
    /// `installed = false`.
    pub fn is_installed(&self, component: &str) -> ManagerResult<InstallStatus> {
        let latest_version = self.metadata.latest_version(component)?;
        let prefix = self.metadata.component_package_name(component)?;

        let packages = self.installed_packages()?;
        let matches: Vec<&String> = packages.iter().filter(|p| p.contains(&prefix)).collect();

        let installed_version = match matches.as_slice() {
            [] => None,
            [package] => {
                let version = extract_version(package).map(str::to_string);
                if version.is_none() {
                    warn!(component, package = %package, "Installed package name has no version");
                }
                version
            }
            many => {
                warn!(
                    component,
                    matches = ?many,
                    "Several installed packages match; treating as not installed"
                );
                None
            }
        };

        Ok(InstallStatus {
            component: component.to_string(),
            installed: installed_version.is_some(),
            installed_version,
            latest_version,
        })
    }

    /// Names of every package installed on the device.
    pub fn installed_packages(&self) -> ManagerResult<Vec<String>> {
        let payload = self.tasks().submit_and_wait(&TaskOperation::Query)?;

        Ok(payload
            .get("queryResponse")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e.get("packageName").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl<T: Transport, D: Downloader> PackageManager<T, MetadataCatalog, D> {
    /// Every component in the catalog.
    pub fn components(&self) -> Vec<ComponentInfo> {
        self.metadata.components()
    }
}
