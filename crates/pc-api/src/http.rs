//! Shared HTTP response helpers.
//!
//! Status checks live here so the endpoint modules only build requests and
//! map bodies.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Return the response unchanged on success, otherwise
/// [`ApiError::Status`] carrying the backend's message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map_or_else(|| body.trim().to_string(), str::to_string)
    });
    tracing::debug!(status = status.as_u16(), %message, "backend returned an error status");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Read and decode a JSON body.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": ...}`, `{"error": ...}` or a short plain-text body.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return ["message", "error"]
            .iter()
            .find_map(|field| value.get(field).and_then(serde_json::Value::as_str))
            .map(str::to_string);
    }
    (!trimmed.starts_with('<')).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[test]
    fn message_from_json_body() {
        assert_eq!(
            extract_message(r#"{"message": "User already exists"}"#).as_deref(),
            Some("User already exists")
        );
        assert_eq!(
            extract_message(r#"{"error": "Bad credentials"}"#).as_deref(),
            Some("Bad credentials")
        );
    }

    #[test]
    fn message_from_plain_text_body() {
        assert_eq!(extract_message("  nope \n").as_deref(), Some("nope"));
        assert_eq!(extract_message("<html>500</html>"), None);
        assert_eq!(extract_message(""), None);
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(204, "")).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_unauthorized() {
        let err = check_response(mock_response(401, "")).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(matches!(err, ApiError::Status { status: 401, ref message } if message == "Unauthorized"));
    }

    #[tokio::test]
    async fn check_response_conflict_keeps_backend_message() {
        let err = check_response(mock_response(409, r#"{"message":"taken"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "API error (409): taken");
    }

    #[tokio::test]
    async fn read_json_reports_decode_errors() {
        let err = read_json::<Vec<u32>>(mock_response(200, "{}")).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
