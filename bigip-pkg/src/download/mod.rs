//! Fetching package RPMs to the local machine.
//!
//! - [`Downloader`] is the seam the package manager depends on
//! - [`HttpDownloader`] streams over blocking reqwest
//! - [`calculate_file_checksum`] / [`verify_checksum`] check SHA-256 digests

mod checksum;
mod error;
mod http;

pub use checksum::{calculate_file_checksum, verify_checksum};
pub use error::{DownloadError, DownloadResult};
pub use http::HttpDownloader;

use std::path::Path;

/// Fetches a remote artifact to a local path.
pub trait Downloader: Send + Sync {
    /// Download `url` to `dest`, creating parent directories as needed.
    ///
    /// When `expected_checksum` is given, the written file must hash to it
    /// (lowercase hex SHA-256). Returns the number of bytes written.
    fn fetch(&self, url: &str, dest: &Path, expected_checksum: Option<&str>)
        -> DownloadResult<u64>;
}

impl<D: Downloader + ?Sized> Downloader for &D {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
        expected_checksum: Option<&str>,
    ) -> DownloadResult<u64> {
        (**self).fetch(url, dest, expected_checksum)
    }
}
