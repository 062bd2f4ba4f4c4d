//! Blocking reqwest implementation of [`Transport`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use super::error::{TransportError, TransportResult};
use super::request::{ApiRequest, RequestBody};
use super::traits::{AuthProvider, Transport};
use crate::USER_AGENT;

/// Header carrying the authentication token.
pub const AUTH_TOKEN_HEADER: &str = "X-F5-Auth-Token";

/// Default timeout for a single HTTP request in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for a device.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Management address, `host` or `host:port`. A scheme may be included.
    pub host: String,

    /// Whether to verify the device's TLS certificate.
    ///
    /// Devices usually ship with self-signed certificates, so this is off
    /// by default.
    pub verify_tls: bool,

    /// Timeout for a single request.
    pub timeout: Duration,
}

impl TransportConfig {
    /// Create settings for the given host with default options.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            verify_tls: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Enable or disable TLS certificate verification.
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL for the device, `https://host` unless a scheme was given.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }

    /// Build a blocking client honouring these settings.
    pub(crate) fn build_client(&self) -> TransportResult<Client> {
        Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_tls)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))
    }
}

/// Transport backed by a blocking reqwest client.
pub struct ReqwestTransport<A: AuthProvider> {
    client: Client,
    base_url: String,
    auth: A,
}

impl<A: AuthProvider> ReqwestTransport<A> {
    /// Create a transport for the configured device.
    pub fn new(config: &TransportConfig, auth: A) -> TransportResult<Self> {
        Ok(Self {
            client: config.build_client()?,
            base_url: config.base_url(),
            auth,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl<A: AuthProvider> Transport for ReqwestTransport<A> {
    fn request(&self, request: ApiRequest) -> TransportResult<Value> {
        let ApiRequest {
            method,
            uri,
            headers,
            body,
        } = request;

        let token = self.auth.token()?;
        let url = format!("{}{}", self.base_url, uri);
        debug!(method = %method, uri = %uri, "Sending request");

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(AUTH_TOKEN_HEADER, token.as_str());

        if let RequestBody::Json(_) = body {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }

        for (name, value) in &headers {
            // reqwest frames the body itself; a second length header would
            // corrupt the request.
            if name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Raw(bytes) => builder.body(bytes),
        };

        let response = builder.send().map_err(|e| TransportError::Connection {
            uri: uri.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TransportError::Status {
                method: method.to_string(),
                uri,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().map_err(|e| TransportError::Connection {
            uri: uri.clone(),
            reason: format!("failed to read response: {}", e),
        })?;

        decode_body(&uri, &bytes)
    }
}

/// Decode a response body, treating an empty body as `null`.
fn decode_body(uri: &str, bytes: &[u8]) -> TransportResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| TransportError::Decode {
        uri: uri.to_string(),
        reason: e.to_string(),
    })
}
