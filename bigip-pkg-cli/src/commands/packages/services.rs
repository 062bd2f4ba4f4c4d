//! Concrete implementations of the service traits.
//!
//! These wrap the bigip-pkg library, adapting it to the trait interfaces
//! used by handlers.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use bigip_pkg::config::ConfigFile;
use bigip_pkg::download::HttpDownloader;
use bigip_pkg::manager::{
    InstallProgressCallback, InstallStage, InstallStatus, OperationResult, PackageManager,
    UninstallResult,
};
use bigip_pkg::metadata::{ComponentInfo, MetadataCatalog, VersionSpec};
use bigip_pkg::transport::{AuthProvider, LoginAuth, ReqwestTransport, StaticToken};

use super::traits::{Output, PackageService, UserInteraction};
use crate::error::CliError;

// ============================================================================
// Console Output Implementation
// ============================================================================

/// Standard console output, with an indicatif spinner for install progress.
#[derive(Default)]
pub struct ConsoleOutput {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleOutput {
    /// Create a new console output.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Output for ConsoleOutput {
    fn println(&self, message: &str) {
        println!("{}", message);
    }

    fn create_progress_callback(&self) -> InstallProgressCallback {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut current) = self.spinner.lock() {
            if let Some(previous) = current.replace(spinner.clone()) {
                previous.finish_and_clear();
            }
        }

        Box::new(move |stage: InstallStage, message: &str| {
            spinner.set_message(format!("{}: {}", stage.name(), message));
        })
    }

    fn progress_done(&self) {
        if let Ok(mut current) = self.spinner.lock() {
            if let Some(spinner) = current.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

// ============================================================================
// Console User Interaction Implementation
// ============================================================================

/// Standard console user interaction implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleInteraction;

impl ConsoleInteraction {
    /// Create a new console interaction.
    pub fn new() -> Self {
        Self
    }
}

impl UserInteraction for ConsoleInteraction {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N]: ", message);
        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return false;
        }

        let input = input.trim().to_lowercase();
        input == "y" || input == "yes"
    }
}

// ============================================================================
// Default Package Service Implementation
// ============================================================================

type DeviceManager =
    PackageManager<ReqwestTransport<Arc<dyn AuthProvider>>, MetadataCatalog, HttpDownloader>;

/// Package service backed by the library's `PackageManager`.
pub struct DefaultPackageService {
    catalog: MetadataCatalog,
    device: Option<DeviceManager>,
}

impl DefaultPackageService {
    /// A service that can only answer catalog queries.
    pub fn catalog_only(config: &ConfigFile) -> Result<Self, CliError> {
        Ok(Self {
            catalog: load_catalog(config)?,
            device: None,
        })
    }

    /// A service connected to the configured device.
    pub fn connect(config: &ConfigFile) -> Result<Self, CliError> {
        let catalog = load_catalog(config)?;

        let host = config.device.host.as_deref().ok_or_else(|| {
            CliError::Config(
                "No device specified. Use --host or set host in config.ini [device] section."
                    .to_string(),
            )
        })?;
        let transport_config = config.to_transport_config(host);

        let auth: Arc<dyn AuthProvider> = match (&config.device.token, &config.device.password) {
            (Some(token), _) => Arc::new(StaticToken::new(token.as_str())),
            (None, Some(password)) => Arc::new(
                LoginAuth::new(
                    &transport_config,
                    config.device.username.as_str(),
                    password.as_str(),
                )
                .map_err(|e| CliError::Device(e.to_string()))?,
            ),
            (None, None) => {
                return Err(CliError::Config(
                    "No credentials specified. Use --token or --password (or BIGIP_TOKEN / BIGIP_PASSWORD)."
                        .to_string(),
                ))
            }
        };

        let transport = ReqwestTransport::new(&transport_config, auth)
            .map_err(|e| CliError::Device(e.to_string()))?;
        let downloader = HttpDownloader::new().map_err(|e| CliError::Device(e.to_string()))?;

        Ok(Self {
            device: Some(PackageManager::new(
                transport,
                catalog.clone(),
                downloader,
                config.to_manager_config(),
            )),
            catalog,
        })
    }

    fn device(&self) -> Result<&DeviceManager, CliError> {
        self.device
            .as_ref()
            .ok_or_else(|| CliError::Device("not connected to a device".to_string()))
    }
}

fn load_catalog(config: &ConfigFile) -> Result<MetadataCatalog, CliError> {
    match &config.packages.metadata_file {
        Some(path) => MetadataCatalog::from_file(path),
        None => MetadataCatalog::bundled(),
    }
    .map_err(|e| CliError::Config(e.to_string()))
}

impl PackageService for DefaultPackageService {
    fn install(
        &self,
        component: &str,
        version: &VersionSpec,
        on_progress: Option<InstallProgressCallback>,
    ) -> Result<OperationResult, CliError> {
        Ok(self
            .device()?
            .install_with_progress(component, version, on_progress)?)
    }

    fn uninstall(
        &self,
        component: &str,
        version: &VersionSpec,
    ) -> Result<UninstallResult, CliError> {
        Ok(self.device()?.uninstall(component, version)?)
    }

    fn status(&self, component: &str) -> Result<InstallStatus, CliError> {
        Ok(self.device()?.is_installed(component)?)
    }

    fn components(&self) -> Vec<ComponentInfo> {
        self.catalog.components()
    }
}
