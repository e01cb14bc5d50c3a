//! Client-side JWT payload decoding.
//!
//! Only the payload segment is read. The signature is the backend's concern
//! and is not verified here.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::TokenError;

/// Claims this client relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// `sub`: the username.
    pub subject: String,
    /// `exp`.
    pub expires_at: DateTime<Utc>,
    /// `iat`, when present.
    pub issued_at: Option<DateTime<Utc>>,
}

impl TokenClaims {
    /// Expired once `now` is strictly past `exp`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[derive(Deserialize)]
struct Payload {
    sub: String,
    exp: i64,
    #[serde(default)]
    iat: Option<i64>,
}

/// Decode the claims of `token`.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] if the token is not three dot-separated
/// segments, the payload is not base64url JSON, or `sub`/`exp` are missing or
/// out of range.
pub fn decode(token: &str) -> Result<TokenClaims, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 || segments.iter().any(|segment| segment.is_empty()) {
        return Err(TokenError::Malformed("expected three dot-separated segments".into()));
    }

    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| TokenError::Malformed(format!("payload is not base64url: {e}")))?;
    let payload: Payload = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("payload is not valid claims JSON: {e}")))?;

    let expires_at = DateTime::from_timestamp(payload.exp, 0)
        .ok_or_else(|| TokenError::Malformed(format!("exp {} is out of range", payload.exp)))?;
    let issued_at = payload.iat.and_then(|iat| DateTime::from_timestamp(iat, 0));

    Ok(TokenClaims {
        subject: payload.sub,
        expires_at,
        issued_at,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn make_jwt(sub: &str, exp: i64) -> String {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(format!(r#"{{"sub":"{sub}","exp":{exp},"iat":{}}}"#, exp - 3600));
        let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn decodes_subject_and_expiry() {
        let claims = decode(&make_jwt("alice", 1_900_000_000)).expect("decode");
        assert_eq!(claims.subject, "alice");
        assert_eq!(claims.expires_at.timestamp(), 1_900_000_000);
        assert_eq!(claims.issued_at.map(|t| t.timestamp()), Some(1_899_996_400));
    }

    #[test]
    fn padded_payload_is_accepted() {
        let jwt = make_jwt("bob", 1_900_000_000);
        let mut parts: Vec<String> = jwt.split('.').map(str::to_string).collect();
        parts[1].push_str("==");
        assert!(decode(&parts.join(".")).is_ok());
    }

    #[test]
    fn expiry_is_strict() {
        let claims = decode(&make_jwt("alice", 1_000)).expect("decode");
        let at_exp = DateTime::from_timestamp(1_000, 0).expect("ts");
        assert!(!claims.is_expired(at_exp));
        assert!(claims.is_expired(at_exp + chrono::TimeDelta::milliseconds(1)));
    }

    #[rstest]
    #[case("not-a-jwt")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    #[case("..")]
    #[case("header.!!!.sig")]
    #[case("header.eyJmb28iOjF9.sig")] // {"foo":1}: no sub/exp
    fn malformed_tokens_are_errors_not_panics(#[case] token: &str) {
        assert!(matches!(decode(token), Err(TokenError::Malformed(_))));
    }
}
