//! HTTP signature authentication
//!
//! Every POST carries a SHA-256 body digest and an HMAC-SHA256 signature
//! over `host date (request-target) digest v-c-merchant-id`, keyed with the
//! base64-decoded shared secret.

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use chrono::{DateTime, Utc};
use gateway_core::TransportError;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// RFC 1123 date as sent in the `Date` header
pub const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Signed header list, in signing order
pub const SIGNED_HEADERS: &str = "host date (request-target) digest v-c-merchant-id";

/// Key material for signing
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    /// Merchant id (`v-c-merchant-id`)
    pub merchant_id: String,
    /// Shared-secret key id
    pub key_id: String,
    /// Decoded shared secret
    pub secret: Vec<u8>,
}

impl SigningKey {
    /// Decode a base64 shared secret
    pub fn new(
        merchant_id: impl Into<String>,
        key_id: impl Into<String>,
        shared_secret: &str,
    ) -> Result<Self, base64::DecodeError> {
        Ok(Self {
            merchant_id: merchant_id.into(),
            key_id: key_id.into(),
            secret: BASE64_ENGINE.decode(shared_secret.trim())?,
        })
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("merchant_id", &self.merchant_id)
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// `base64(sha256(body))`
pub fn digest(body: &[u8]) -> String {
    BASE64_ENGINE.encode(Sha256::digest(body))
}

/// `Date` header value
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// Authentication headers for a POST to `path` on `host`
pub fn sign(
    key: &SigningKey,
    host: &str,
    path: &str,
    date: &str,
    body: &[u8],
) -> Result<Vec<(String, String)>, TransportError> {
    let digest = digest(body);

    let signing_string = format!(
        "host: {host}\ndate: {date}\n(request-target): post {path}\ndigest: SHA-256={digest}\nv-c-merchant-id: {}",
        key.merchant_id
    );

    let mut mac = HmacSha256::new_from_slice(&key.secret)
        .map_err(|e| TransportError::Encode(e.to_string()))?;
    mac.update(signing_string.as_bytes());
    let signature = BASE64_ENGINE.encode(mac.finalize().into_bytes());

    Ok(vec![
        ("Host".to_string(), host.to_string()),
        ("Date".to_string(), date.to_string()),
        ("Digest".to_string(), format!("SHA-256={}", digest)),
        ("v-c-merchant-id".to_string(), key.merchant_id.clone()),
        (
            "Signature".to_string(),
            format!(
                r#"keyid="{}", algorithm="HmacSHA256", headers="{}", signature="{}""#,
                key.key_id, SIGNED_HEADERS, signature
            ),
        ),
    ])
}
