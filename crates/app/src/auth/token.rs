//! API token formatting, parsing and hashing.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

/// API token prefix, followed by an underscore and the hex-encoded secret.
pub const API_TOKEN_PREFIX: &str = "bk";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_api_token(secret: &ApiTokenSecret) -> String {
    format!("{API_TOKEN_PREFIX}_{}", hex::encode(secret.as_bytes()))
}

/// Parse a raw bearer token.
///
/// # Errors
///
/// Returns an error if the prefix is wrong or the secret is not 64 hex characters.
pub fn parse_api_token(token: &str) -> Result<ApiTokenSecret, ApiTokenError> {
    let (prefix, secret_hex) = token.split_once('_').ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    if hex::decode_to_slice(secret_hex, &mut secret).is_err() {
        return Err(ApiTokenError::InvalidSecretEncoding);
    }

    Ok(ApiTokenSecret::from_bytes(secret))
}

/// Hex SHA-256 digest stored in place of the token.
#[must_use]
pub fn hash_api_token(secret: &ApiTokenSecret) -> String {
    hex::encode(Sha256::digest(format_api_token(secret).as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(&secret);

        assert!(token.starts_with("bk_"));
        assert_eq!(token.len(), 3 + API_TOKEN_SECRET_BYTES * 2);

        let parsed = parse_api_token(&token).expect("token should parse");

        assert_eq!(parsed.as_bytes(), secret.as_bytes());
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let token = format!("lt_{}", "ab".repeat(API_TOKEN_SECRET_BYTES));

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_short_or_non_hex_secret() {
        assert!(matches!(
            parse_api_token("bk_abcd"),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));

        let non_hex = format!("bk_{}", "zz".repeat(API_TOKEN_SECRET_BYTES));

        assert!(matches!(
            parse_api_token(&non_hex),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn hash_is_deterministic_and_hex() {
        let secret = ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]);

        let hash1 = hash_api_token(&secret);
        let hash2 = hash_api_token(&secret);

        assert_eq!(hash1, hash2, "hash must be deterministic");
        assert_eq!(hash1.len(), 64);
        assert!(hash1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_secrets_differ() {
        let a = generate_api_token_secret();
        let b = generate_api_token_secret();

        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn debug_redacts_secret() {
        let secret = ApiTokenSecret::from_bytes([0x11; API_TOKEN_SECRET_BYTES]);

        assert_eq!(format!("{secret:?}"), "ApiTokenSecret(**redacted**)");
    }
}
