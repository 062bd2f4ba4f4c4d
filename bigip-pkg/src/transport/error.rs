//! Error types for the transport layer.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised while talking to the device.
///
/// Every variant is fatal for the operation in progress; the transport never
/// retries on its own.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The device answered with a non-2xx status.
    #[error("{method} {uri} failed with HTTP {status}: {body}")]
    Status {
        method: String,
        uri: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response.
    #[error("request to {uri} failed: {reason}")]
    Connection { uri: String, reason: String },

    /// The response body was not valid JSON.
    #[error("invalid JSON in response from {uri}: {reason}")]
    Decode { uri: String, reason: String },

    /// A token could not be obtained.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The underlying HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl TransportError {
    /// HTTP status code, if the device responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
