//! Token providers.

use parking_lot::Mutex;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::{TransportError, TransportResult};
use super::http::TransportConfig;
use super::traits::{AuthProvider, Token};

/// Login endpoint on the device.
pub const LOGIN_URI: &str = "/mgmt/shared/authn/login";

/// Login provider used unless another is configured.
pub const DEFAULT_LOGIN_PROVIDER: &str = "tmos";

/// A token supplied up front by the caller.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: Token,
}

impl StaticToken {
    /// Wrap an existing token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Token::new(token),
        }
    }
}

impl AuthProvider for StaticToken {
    fn token(&self) -> TransportResult<Token> {
        Ok(self.token.clone())
    }
}

/// Acquires a token from the device with a username and password.
///
/// The first call logs in; the token is cached for the lifetime of the
/// provider.
pub struct LoginAuth {
    client: Client,
    login_url: String,
    username: String,
    password: String,
    login_provider: String,
    cached: Mutex<Option<Token>>,
}

impl LoginAuth {
    /// Create a provider for the configured device.
    pub fn new(
        config: &TransportConfig,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> TransportResult<Self> {
        Ok(Self {
            client: config.build_client()?,
            login_url: format!("{}{}", config.base_url(), LOGIN_URI),
            username: username.into(),
            password: password.into(),
            login_provider: DEFAULT_LOGIN_PROVIDER.to_string(),
            cached: Mutex::new(None),
        })
    }

    /// Use a different login provider (e.g. an LDAP or RADIUS provider name).
    pub fn with_login_provider(mut self, provider: impl Into<String>) -> Self {
        self.login_provider = provider.into();
        self
    }

    fn login(&self) -> TransportResult<Token> {
        info!(username = %self.username, provider = %self.login_provider, "Logging in to device");

        let body = json!({
            "username": self.username,
            "password": self.password,
            "loginProviderName": self.login_provider,
        });

        let response = self
            .client
            .post(&self.login_url)
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(|e| TransportError::Auth(format!("login request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TransportError::Auth(format!(
                "login failed with HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| TransportError::Auth(format!("failed to read login response: {}", e)))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| TransportError::Auth(format!("invalid login response: {}", e)))?;

        token_from_login_response(&value)
    }
}

impl AuthProvider for LoginAuth {
    fn token(&self) -> TransportResult<Token> {
        let mut cached = self.cached.lock();
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.login()?;
        debug!("Login succeeded, token cached");
        *cached = Some(token.clone());
        Ok(token)
    }
}

/// Extract `token.token` from a login response.
fn token_from_login_response(value: &Value) -> TransportResult<Token> {
    value
        .get("token")
        .and_then(|t| t.get("token"))
        .and_then(Value::as_str)
        .map(Token::new)
        .ok_or_else(|| TransportError::Auth("login response did not contain a token".to_string()))
}
