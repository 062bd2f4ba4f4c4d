//! Streaming HTTP downloader.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use super::checksum::verify_checksum;
use super::error::{DownloadError, DownloadResult};
use super::Downloader;

/// Default request timeout (5 minutes).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Buffer size for streaming the response body (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Downloads artifacts with a blocking reqwest client.
///
/// The body is streamed straight to disk. A partially written or
/// checksum-failing file is removed before the error is returned.
#[derive(Debug)]
pub struct HttpDownloader {
    client: Client,
    timeout: Duration,
}

impl HttpDownloader {
    /// Create a downloader with the default timeout.
    pub fn new() -> DownloadResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a downloader with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> DownloadResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| DownloadError::Client(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// The request timeout in use.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn stream_to(&self, url: &str, dest: &Path) -> DownloadResult<u64> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DownloadError::Request {
                url: url.to_string(),
                reason: if e.is_timeout() {
                    format!("timed out after {}s", self.timeout.as_secs())
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let write_failed = |source| DownloadError::WriteFailed {
            path: dest.to_path_buf(),
            source,
        };

        let file = File::create(dest).map_err(write_failed)?;
        let mut writer = BufWriter::new(file);
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut downloaded = 0u64;

        loop {
            let bytes_read = response
                .read(&mut buffer)
                .map_err(|e| DownloadError::Request {
                    url: url.to_string(),
                    reason: format!("read error: {}", e),
                })?;

            if bytes_read == 0 {
                break;
            }

            writer
                .write_all(&buffer[..bytes_read])
                .map_err(write_failed)?;
            downloaded += bytes_read as u64;
        }

        writer.flush().map_err(write_failed)?;
        Ok(downloaded)
    }
}

impl Downloader for HttpDownloader {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
        expected_checksum: Option<&str>,
    ) -> DownloadResult<u64> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DownloadError::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        debug!(url, dest = %dest.display(), "Starting download");

        let result = self.stream_to(url, dest).and_then(|bytes| {
            if let Some(expected) = expected_checksum {
                verify_checksum(dest, expected)?;
            }
            Ok(bytes)
        });

        match result {
            Ok(bytes) => {
                info!(url, bytes, "Download complete");
                Ok(bytes)
            }
            Err(e) => {
                fs::remove_file(dest).ok();
                Err(e)
            }
        }
    }
}
