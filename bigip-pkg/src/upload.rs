//! Chunked file upload to the device's file-transfer endpoint.
//!
//! The device accepts large files as a series of `POST`s, each carrying one
//! byte range of the file:
//!
//! ```text
//! POST /mgmt/shared/file-transfer/uploads/{basename}
//! Content-Range: {start}-{end - 1}/{total}
//! Content-Length: {end}
//! Content-Type: application/octet-stream
//! ```
//!
//! Chunks are sent strictly in order, one at a time. The first failure aborts
//! the upload and leaves the local file in place so the caller can retry.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::transport::{ApiRequest, Transport, TransportError};

/// Collection path for uploads; the file's base name is appended.
pub const UPLOAD_URI: &str = "/mgmt/shared/file-transfer/uploads";

/// Default chunk size (1 MiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// Result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can occur while uploading a file.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Chunk size must be at least one byte.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// The path has no file name to upload under.
    #[error("cannot derive an upload name from {}", .0.display())]
    InvalidPath(PathBuf),

    /// Failed to read the source file.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Upload succeeded but the source file could not be removed.
    #[error("failed to delete {}: {source}", path.display())]
    DeleteFailed { path: PathBuf, source: io::Error },

    /// A chunk request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Upload settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadConfig {
    /// Bytes per chunk. Default: 1 MiB.
    pub chunk_size: u64,

    /// Remove the local file once every chunk is acknowledged. Default: true.
    pub delete_after: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            delete_after: true,
        }
    }
}

impl UploadConfig {
    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Enable or disable deleting the source after a successful upload.
    pub fn with_delete_after(mut self, delete: bool) -> Self {
        self.delete_after = delete;
        self
    }
}

/// A non-empty half-open byte range `[start, end)` of a file of `total` bytes.
///
/// Only [`ByteRange::new`] and [`chunk_ranges`] build ranges, so
/// `start < end <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: u64,
    end: u64,
    total: u64,
}

impl ByteRange {
    /// A range, or `None` if it would be empty or run past `total`.
    pub fn new(start: u64, end: u64, total: u64) -> Option<Self> {
        (start < end && end <= total).then_some(Self { start, end, total })
    }

    /// First byte offset.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// One past the last byte offset.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Size of the whole file.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of bytes in the range; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// `Content-Range` header value: inclusive end, `start-(end-1)/total`.
    pub fn content_range(&self) -> String {
        format!("{}-{}/{}", self.start, self.end - 1, self.total)
    }
}

/// Iterator over the chunk ranges of a file.
///
/// Yields nothing for an empty file or a zero chunk size.
#[derive(Debug, Clone)]
pub struct ChunkRanges {
    next: u64,
    total: u64,
    chunk_size: u64,
}

impl Iterator for ChunkRanges {
    type Item = ByteRange;

    fn next(&mut self) -> Option<ByteRange> {
        if self.chunk_size == 0 || self.next >= self.total {
            return None;
        }
        let start = self.next;
        let end = start.saturating_add(self.chunk_size).min(self.total);
        self.next = end;
        ByteRange::new(start, end, self.total)
    }
}

/// Split `total` bytes into sequential chunks of `chunk_size`.
pub fn chunk_ranges(total: u64, chunk_size: u64) -> ChunkRanges {
    ChunkRanges {
        next: 0,
        total,
        chunk_size,
    }
}

/// Read state for one file transfer.
///
/// The offset only moves forward, from 0 to the file size captured when the
/// session was opened.
#[derive(Debug)]
pub struct UploadSession {
    path: PathBuf,
    file: File,
    ranges: ChunkRanges,
    total_size: u64,
    offset: u64,
}

impl UploadSession {
    /// Open a file and capture its size.
    pub fn open(path: &Path, chunk_size: u64) -> UploadResult<Self> {
        if chunk_size == 0 {
            return Err(UploadError::InvalidChunkSize);
        }

        let read_failed = |source| UploadError::ReadFailed {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(read_failed)?;
        let total_size = file.metadata().map_err(read_failed)?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            ranges: chunk_ranges(total_size, chunk_size),
            total_size,
            offset: 0,
        })
    }

    /// Size of the file when the session was opened.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Bytes read so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next chunk, or `None` once the whole file has been read.
    pub fn next_chunk(&mut self) -> UploadResult<Option<(ByteRange, Vec<u8>)>> {
        let Some(range) = self.ranges.next() else {
            return Ok(None);
        };

        let mut buffer = vec![0u8; range.len() as usize];
        self.file
            .read_exact(&mut buffer)
            .map_err(|source| UploadError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        self.offset = range.end();

        Ok(Some((range, buffer)))
    }
}

/// Summary of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    /// Name the file was uploaded under.
    pub remote_name: String,
    /// Total bytes sent.
    pub bytes_sent: u64,
    /// Number of chunk requests sent.
    pub chunks: usize,
    /// Whether the local file was removed.
    pub deleted: bool,
}

/// Streams local files to the device in byte-range chunks.
pub struct ChunkedUploader<T: Transport> {
    transport: T,
    config: UploadConfig,
}

impl<T: Transport> ChunkedUploader<T> {
    /// Create an uploader.
    pub fn new(transport: T, config: UploadConfig) -> Self {
        Self { transport, config }
    }

    /// The upload settings.
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Upload a file, then delete it if configured to.
    ///
    /// The file is only deleted after every chunk succeeded.
    pub fn upload(&self, path: &Path) -> UploadResult<UploadSummary> {
        let remote_name = remote_file_name(path)?;
        let uri = format!("{}/{}", UPLOAD_URI, remote_name);

        let mut session = UploadSession::open(path, self.config.chunk_size)?;
        info!(
            file = %path.display(),
            size = session.total_size(),
            chunk_size = self.config.chunk_size,
            "Uploading file to device"
        );

        let mut chunks = 0;
        while let Some((range, bytes)) = session.next_chunk()? {
            debug!(range = %range.content_range(), "Uploading chunk");
            let request = ApiRequest::post_raw(uri.clone(), bytes)
                .with_header("Content-Range", range.content_range())
                .with_header("Content-Length", range.end().to_string())
                .with_header("Content-Type", "application/octet-stream");
            self.transport.request(request)?;
            chunks += 1;
        }

        let bytes_sent = session.offset();
        drop(session);

        if self.config.delete_after {
            fs::remove_file(path).map_err(|source| UploadError::DeleteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }

        Ok(UploadSummary {
            remote_name,
            bytes_sent,
            chunks,
            deleted: self.config.delete_after,
        })
    }
}

/// Base name used for the remote file.
pub fn remote_file_name(path: &Path) -> UploadResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or_else(|| UploadError::InvalidPath(path.to_path_buf()))
}
