//! Error types for package lifecycle operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::download::DownloadError;
use crate::metadata::MetadataError;
use crate::task::TaskError;
use crate::upload::UploadError;

/// Result type for package manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors from install, uninstall and status queries.
///
/// Failures from the underlying steps are carried through unchanged.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Task(#[from] TaskError),

    /// The local download directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// The download URL does not end in a file name.
    #[error("download URL '{0}' has no file name")]
    InvalidDownloadUrl(String),
}
