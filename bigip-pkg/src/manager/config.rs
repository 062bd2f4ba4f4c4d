//! Configuration for the package manager.

use std::path::PathBuf;

use crate::task::PollPolicy;
use crate::upload::UploadConfig;

/// Directory on the device that uploaded files land in.
pub const DEFAULT_REMOTE_DOWNLOAD_DIR: &str = "/var/config/rest/downloads";

/// Configuration for the package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Local directory RPMs are downloaded into before upload.
    pub temp_dir: PathBuf,

    /// Chunking and cleanup of uploads.
    pub upload: UploadConfig,

    /// How often and how long to poll package tasks.
    pub poll: PollPolicy,

    /// Device directory uploaded files are installed from.
    pub remote_download_dir: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir().join("bigip-pkg"),
            upload: UploadConfig::default(),
            poll: PollPolicy::default(),
            remote_download_dir: DEFAULT_REMOTE_DOWNLOAD_DIR.to_string(),
        }
    }
}

impl ManagerConfig {
    /// Create a configuration downloading into the given directory.
    pub fn new(temp_dir: PathBuf) -> Self {
        Self {
            temp_dir,
            ..Default::default()
        }
    }

    /// Set the upload settings.
    pub fn with_upload(mut self, upload: UploadConfig) -> Self {
        self.upload = upload;
        self
    }

    /// Set the task poll policy.
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Set the device directory uploads are installed from.
    pub fn with_remote_download_dir(mut self, dir: impl Into<String>) -> Self {
        self.remote_download_dir = dir.into();
        self
    }

    /// Device path of an uploaded file.
    pub fn remote_package_path(&self, file_name: &str) -> String {
        format!(
            "{}/{}",
            self.remote_download_dir.trim_end_matches('/'),
            file_name
        )
    }
}
