use sha2::{Digest, Sha256};

/// SHA-256 of the password as lowercase hex, the form the backend expects.
///
/// This only keeps the plain password out of request bodies and logs. It is
/// not a substitute for TLS and the digest is itself a replayable credential.
#[must_use]
pub fn digest_password(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
