//! Configuration structs and their defaults.

use std::path::PathBuf;
use std::time::Duration;

use super::file::config_directory;
use crate::manager::{ManagerConfig, DEFAULT_REMOTE_DOWNLOAD_DIR};
use crate::task::{PollPolicy, DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL};
use crate::transport::TransportConfig;
use crate::upload::{UploadConfig, DEFAULT_CHUNK_SIZE};

/// Default device user.
pub const DEFAULT_USERNAME: &str = "admin";

/// Default device request timeout in seconds.
pub const DEFAULT_DEVICE_TIMEOUT_SECS: u64 = 60;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "bigip-pkg.log";

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub device: DeviceSettings,
    pub packages: PackageSettings,
    pub tasks: TaskSettings,
    pub logging: LoggingSettings,
}

/// `[device]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    /// Management address, with or without scheme.
    pub host: Option<String>,
    pub username: String,
    pub password: Option<String>,
    /// Pre-issued auth token; takes precedence over username/password.
    pub token: Option<String>,
    pub verify_tls: bool,
    pub timeout_secs: u64,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            host: None,
            username: DEFAULT_USERNAME.to_string(),
            password: None,
            token: None,
            verify_tls: false,
            timeout_secs: DEFAULT_DEVICE_TIMEOUT_SECS,
        }
    }
}

/// `[packages]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSettings {
    /// Catalog to use instead of the bundled one.
    pub metadata_file: Option<PathBuf>,
    /// Local download directory.
    pub temp_dir: PathBuf,
    /// Upload chunk size in bytes.
    pub chunk_size: u64,
    /// Keep downloaded RPMs after a successful upload.
    pub keep_downloads: bool,
    pub remote_download_dir: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            metadata_file: None,
            temp_dir: std::env::temp_dir().join("bigip-pkg"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            keep_downloads: false,
            remote_download_dir: DEFAULT_REMOTE_DOWNLOAD_DIR.to_string(),
        }
    }
}

/// `[tasks]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSettings {
    pub poll_interval_secs: u64,
    pub max_polls: u32,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: config_directory().join("logs"),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl ConfigFile {
    /// Package manager settings described by this file.
    pub fn to_manager_config(&self) -> ManagerConfig {
        ManagerConfig::new(self.packages.temp_dir.clone())
            .with_upload(
                UploadConfig::default()
                    .with_chunk_size(self.packages.chunk_size)
                    .with_delete_after(!self.packages.keep_downloads),
            )
            .with_poll_policy(PollPolicy::new(
                Duration::from_secs(self.tasks.poll_interval_secs),
                self.tasks.max_polls,
            ))
            .with_remote_download_dir(self.packages.remote_download_dir.clone())
    }

    /// Transport settings for `host`, using this file's TLS and timeout.
    pub fn to_transport_config(&self, host: impl Into<String>) -> TransportConfig {
        TransportConfig::new(host)
            .with_verify_tls(self.device.verify_tls)
            .with_timeout(Duration::from_secs(self.device.timeout_secs))
    }
}
