//! Cache key derivation
//!
//! A request for `(remote, sha)` is identified by the key `remote#sha`.
//! Single-use requests append `+<uuid>` so they never share an entry with
//! anyone else. The lookup token is the hex HMAC-SHA256 of the key under an
//! empty secret.

use crate::error::{MakerError, MakerResult};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// A derived cache key and its lookup hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheKey {
    /// Human-readable key, used for log correlation
    pub key: String,

    /// Hex digest of `key`, used as the cache lookup token
    pub hash: String,
}

impl CacheKey {
    /// Derive the key and hash for a build request
    pub fn derive(remote: &str, sha: &str, single_use: bool) -> MakerResult<Self> {
        if remote.trim().is_empty() {
            return Err(MakerError::InvalidInput("remote must not be empty".to_string()));
        }
        if sha.trim().is_empty() {
            return Err(MakerError::InvalidInput("sha must not be empty".to_string()));
        }

        let mut key = format!("{}#{}", remote, sha);
        if single_use {
            key.push('+');
            key.push_str(&Uuid::new_v4().to_string());
        }

        let hash = hmac_hex(&key);
        Ok(Self { key, hash })
    }
}

/// Hex HMAC-SHA256 of `input` with an empty secret
pub fn hmac_hex(input: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(b"").expect("HMAC can take key of any size");
    mac.update(input.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
