//! Download errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;

/// Errors that can occur while fetching an artifact.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The request could not be sent or the body could not be read.
    #[error("download of {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("download of {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Writing the destination file failed.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// Reading a downloaded file back failed.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// The downloaded file does not hash to the published checksum.
    #[error("checksum mismatch for {filename}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        filename: String,
        expected: String,
        actual: String,
    },
}
