//! # pc-api
//!
//! REST client for the area-check backend.
//!
//! Endpoints:
//! - `POST /api/auth/login`, `POST /api/auth/register` ([`AuthApi`])
//! - `GET /api/points/history`, `POST /api/points/check`,
//!   `DELETE /api/points/clear` ([`PointsApi`], bearer-authenticated)
//!
//! The traits are the seam the session and history layers are written
//! against; [`ApiClient`] is the reqwest implementation.

mod auth;
mod error;
mod http;
mod points;

pub use error::ApiError;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use pc_core::{CheckRequest, PointRecord};
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────

/// Body of the login and register calls.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    /// Already digested by the caller; never the raw password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login/register response.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

// ── Traits ─────────────────────────────────────────────────────────

/// Credential exchange endpoints.
pub trait AuthApi: Send + Sync {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenResponse, ApiError>> + Send;

    fn register(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenResponse, ApiError>> + Send;
}

/// Point endpoints. Every call carries `Authorization: Bearer <token>`.
pub trait PointsApi: Send + Sync {
    fn history(&self, token: &str)
    -> impl Future<Output = Result<Vec<PointRecord>, ApiError>> + Send;

    fn check(
        &self,
        token: &str,
        request: &CheckRequest,
    ) -> impl Future<Output = Result<PointRecord, ApiError>> + Send;

    fn clear(&self, token: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8080`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if the URL has no http(s) scheme and
    /// [`ApiError::Transport`] if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Client(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("pointcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/", Duration::from_secs(1)).expect("client");
        assert_eq!(client.url("/api/points/history"), "http://localhost:8080/api/points/history");
    }

    #[test]
    fn base_url_without_scheme_is_rejected() {
        let err = ApiClient::new("localhost:8080", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::Client(_)));
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let credentials = Credentials {
            username: "alice".into(),
            password: "digest".into(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("digest"));

        let response: TokenResponse = serde_json::from_str(r#"{"token":"a.b.c"}"#).expect("parse");
        assert!(!format!("{response:?}").contains("a.b.c"));
        assert_eq!(response.username, None);
    }
}
