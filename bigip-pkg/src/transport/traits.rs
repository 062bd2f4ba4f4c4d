//! Seams between the workflow and the network.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::error::TransportResult;
use super::request::ApiRequest;

/// Executes authenticated requests against a single device.
///
/// Implementations must fail with [`TransportError`](super::TransportError)
/// on any non-2xx response and return the decoded JSON body otherwise
/// (`Value::Null` for an empty body).
pub trait Transport: Send + Sync {
    /// Send a request and decode the JSON response.
    fn request(&self, request: ApiRequest) -> TransportResult<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(&self, request: ApiRequest) -> TransportResult<Value> {
        (**self).request(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn request(&self, request: ApiRequest) -> TransportResult<Value> {
        (**self).request(request)
    }
}

/// An authentication token for the `X-F5-Auth-Token` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Supplies the token attached to every request.
pub trait AuthProvider: Send + Sync {
    /// Return a valid token, acquiring one if necessary.
    fn token(&self) -> TransportResult<Token>;
}

impl<A: AuthProvider + ?Sized> AuthProvider for Arc<A> {
    fn token(&self) -> TransportResult<Token> {
        (**self).token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::new("secret-token");
        assert_eq!(format!("{:?}", token), "Token(***)");
        assert_eq!(token.as_str(), "secret-token");
    }
}
