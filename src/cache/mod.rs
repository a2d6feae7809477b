//! Two-tier result cache
//!
//! Results are cached under their request hash in two tiers:
//!
//! | Tier | Backend | Lifetime | Visibility |
//! |------|---------|----------|------------|
//! | fast | in-process (moka) | fixed, seconds | this process |
//! | shared | redis | until deleted or expired | every client |
//!
//! Reads consult the fast tier first and fall back to the shared tier,
//! copying a shared hit into the fast tier. Writes and deletes go to both.
//! Only the shared tier's expiry can be extended.
//!
//! The shared tier doubles as the completion signal for in-progress builds:
//! a poller sees a build finish when its result becomes readable here.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryTier;
pub use self::redis::RedisTier;

use crate::error::MakerResult;
use crate::options::{ExtendOptions, SetOptions};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Storage contract required of a cache tier
///
/// Values are serialized JSON. A miss is `Ok(None)`, never an error; any
/// `Err` means the tier itself is unavailable.
#[async_trait]
pub trait CacheTier: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> MakerResult<Option<String>>;

    /// Write a value, with an optional TTL override
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> MakerResult<()>;

    /// Remove a value
    async fn del(&self, key: &str) -> MakerResult<()>;

    /// Reset the expiry of a value. Returns false if the key does not exist.
    async fn expire(&self, key: &str, ttl: Duration) -> MakerResult<bool>;

    /// Tier name for logs and errors
    fn tier_name(&self) -> &'static str;
}

/// Read-through cache over a fast tier and a shared tier
#[derive(Clone)]
pub struct TieredCache {
    fast: Arc<dyn CacheTier>,
    shared: Arc<dyn CacheTier>,
}

impl std::fmt::Debug for TieredCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredCache")
            .field("fast", &self.fast.tier_name())
            .field("shared", &self.shared.tier_name())
            .finish()
    }
}

impl TieredCache {
    pub fn new(fast: Arc<dyn CacheTier>, shared: Arc<dyn CacheTier>) -> Self {
        Self { fast, shared }
    }

    /// Look up a result by hash
    pub async fn get(&self, hash: &str) -> MakerResult<Option<Value>> {
        if let Some(raw) = self.fast.get(hash).await? {
            return Ok(Some(serde_json::from_str(&raw)?));
        }

        match self.shared.get(hash).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)?;
                self.fast.set(hash, &raw, None).await?;
                debug!(hash, "Promoted shared entry to {}", self.fast.tier_name());
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Store a result in both tiers
    ///
    /// The shared tier is written first so a failed write never leaves an
    /// unpersisted entry in the fast tier.
    pub async fn set(&self, hash: &str, result: &Value, options: SetOptions) -> MakerResult<()> {
        let raw = serde_json::to_string(result)?;
        self.shared.set(hash, &raw, options.ttl).await?;
        self.fast.set(hash, &raw, None).await
    }

    /// Remove a result from both tiers
    pub async fn del(&self, hash: &str) -> MakerResult<()> {
        self.fast.del(hash).await?;
        self.shared.del(hash).await
    }

    /// Reset the shared tier expiry of a result
    pub async fn extend(&self, hash: &str, options: ExtendOptions) -> MakerResult<bool> {
        self.shared.expire(hash, options.ttl).await
    }
}
