//! Authenticated JSON transport to the device's iControl REST API.
//!
//! The rest of the crate talks to the device only through the [`Transport`]
//! trait, which makes every higher layer testable with a scripted mock:
//!
//! - `request`: the request model (`ApiRequest`, `RequestBody`)
//! - `traits`: the `Transport` and `AuthProvider` seams
//! - `http`: `ReqwestTransport`, the blocking reqwest implementation
//! - `auth`: `StaticToken` and `LoginAuth` token providers
//! - `error`: `TransportError`

mod auth;
mod error;
mod http;
mod request;
mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use auth::{LoginAuth, StaticToken, DEFAULT_LOGIN_PROVIDER, LOGIN_URI};
pub use error::{TransportError, TransportResult};
pub use http::{ReqwestTransport, TransportConfig, AUTH_TOKEN_HEADER};
pub use request::{ApiRequest, RequestBody};
pub use traits::{AuthProvider, Token, Transport};

// Re-export the HTTP method type used by `ApiRequest`.
pub use reqwest::Method;
