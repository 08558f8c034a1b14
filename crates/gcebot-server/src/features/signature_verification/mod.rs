//! Ed25519 verification of inbound interaction requests.
//!
//! The signed message is `timestamp || raw_body` with no separator. The body
//! must be the exact bytes received on the wire, before any JSON parsing.

use crate::shared::error::{BotError, BotResult};
use axum::http::HeaderMap;
use ring::signature::{UnparsedPublicKey, ED25519};
use std::fmt;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

const PUBLIC_KEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;

/// Application public key used to check interaction signatures.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub fn from_hex(encoded: &str) -> BotResult<Self> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| BotError::config(format!("public key is not valid hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> BotResult<Self> {
        let key: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            BotError::config(format!(
                "public key must be {PUBLIC_KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

/// Checks `signature_hex` over `timestamp || raw_body`.
///
/// Returns `false` for every malformed input instead of erroring.
pub fn verify(
    raw_body: &[u8],
    signature_hex: &str,
    timestamp: &str,
    public_key: &PublicKey,
) -> bool {
    if timestamp.is_empty() {
        return false;
    }

    let signature = match hex::decode(signature_hex.trim()) {
        Ok(bytes) if bytes.len() == SIGNATURE_LEN => bytes,
        _ => return false,
    };

    let mut message = Vec::with_capacity(timestamp.len() + raw_body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(raw_body);

    UnparsedPublicKey::new(&ED25519, public_key.as_bytes())
        .verify(&message, &signature)
        .is_ok()
}

/// Pulls the signature and timestamp headers and verifies them against `raw_body`.
/// A missing or non-ASCII header counts as a failed verification.
pub fn verify_request(headers: &HeaderMap, raw_body: &[u8], public_key: &PublicKey) -> bool {
    let header = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());

    match (header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER)) {
        (Some(signature), Some(timestamp)) => verify(raw_body, signature, timestamp, public_key),
        _ => false,
    }
}
