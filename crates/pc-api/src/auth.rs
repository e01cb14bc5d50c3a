//! Login and registration endpoints.

use crate::http::{check_response, read_json};
use crate::{ApiClient, ApiError, AuthApi, Credentials, TokenResponse};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";

impl ApiClient {
    async fn exchange(&self, path: &str, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        tracing::debug!(path, username = %credentials.username, "exchanging credentials");
        let resp = self.http.post(self.url(path)).json(credentials).send().await?;
        read_json(check_response(resp).await?).await
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        self.exchange(LOGIN_PATH, credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        self.exchange(REGISTER_PATH, credentials).await
    }
}
