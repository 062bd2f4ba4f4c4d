//! Request model shared by every transport implementation.

use reqwest::Method;
use serde_json::Value;

/// Body of a request to the device.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// JSON document, sent with `Content-Type: application/json`.
    Json(Value),
    /// Raw bytes, sent as-is with whatever content type the caller set.
    Raw(Vec<u8>),
}

/// A single request against the device, relative to its management address.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute path on the device, e.g. `/mgmt/tm/sys/version`.
    pub uri: String,
    /// Extra headers, applied after the transport's defaults.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

impl ApiRequest {
    /// Create a request with no headers and no body.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// A `GET` request.
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    /// A `POST` request with a JSON body.
    pub fn post_json(uri: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, uri).with_body(RequestBody::Json(body))
    }

    /// A `POST` request with a raw byte body.
    pub fn post_raw(uri: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(Method::POST, uri).with_body(RequestBody::Raw(bytes))
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Look up a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The JSON body, if any.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}
