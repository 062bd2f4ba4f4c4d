//! Error types for metadata lookups.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors that can occur while resolving component metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The component is not in the metadata.
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// The component exists but not at this version.
    #[error("component '{component}' has no version {version}")]
    UnknownVersion { component: String, version: String },

    /// No version of the component is flagged as latest.
    #[error("component '{0}' has no version flagged as latest")]
    NoLatestVersion(String),

    /// More than one version is flagged as latest.
    #[error("component '{component}' has several versions flagged as latest: {}", versions.join(", "))]
    MultipleLatestVersions {
        component: String,
        versions: Vec<String>,
    },

    /// Failed to read a metadata file.
    #[error("failed to read metadata from {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to parse metadata.
    #[error("failed to parse metadata: {0}")]
    ParseFailed(String),
}
