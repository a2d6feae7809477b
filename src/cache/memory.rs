//! In-process fast tier using Moka
//!
//! Entries share one TTL fixed at construction. The TTL is short so that a
//! deletion or overwrite in the shared tier is visible again within seconds.

use crate::cache::CacheTier;
use crate::error::MakerResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// In-memory cache tier
#[derive(Clone)]
pub struct MemoryTier {
    cache: moka::future::Cache<String, String>,
    ttl: Duration,
}

impl std::fmt::Debug for MemoryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTier")
            .field("max_capacity", &self.cache.policy().max_capacity())
            .field("entry_count", &self.cache.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl MemoryTier {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = moka::future::Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        debug!(
            max_capacity,
            ttl_seconds = ttl.as_secs(),
            "Memory cache tier created"
        );

        Self { cache, ttl }
    }
}

#[async_trait]
impl CacheTier for MemoryTier {
    async fn get(&self, key: &str) -> MakerResult<Option<String>> {
        let result = self.cache.get(key).await;

        if result.is_some() {
            debug!(key, "Cache HIT (memory)");
        } else {
            debug!(key, "Cache MISS (memory)");
        }

        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> MakerResult<()> {
        // TTL is cache-wide
        self.cache.insert(key.to_string(), value.to_string()).await;
        debug!(key, ttl_seconds = self.ttl.as_secs(), "Cache SET (memory)");
        Ok(())
    }

    async fn del(&self, key: &str) -> MakerResult<()> {
        self.cache.invalidate(key).await;
        debug!(key, "Cache DEL (memory)");
        Ok(())
    }

    async fn expire(&self, key: &str, _ttl: Duration) -> MakerResult<bool> {
        // Re-inserting restarts the cache-wide TTL
        match self.cache.get(key).await {
            Some(value) => {
                self.cache.insert(key.to_string(), value).await;
                debug!(key, "Cache EXPIRE (memory)");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn tier_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_none_on_miss() {
        let tier = MemoryTier::new(100, Duration::from_secs(60));
        assert_eq!(tier.get("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_and_get() {
        let tier = MemoryTier::new(100, Duration::from_secs(60));
        tier.set("k", r#"{"id":"c-1"}"#, None).await.unwrap();
        assert_eq!(
            tier.get("k").await.unwrap().as_deref(),
            Some(r#"{"id":"c-1"}"#)
        );
    }

    #[tokio::test]
    async fn ttl_expiry() {
        let tier = MemoryTier::new(100, Duration::from_millis(50));
        tier.set("expiring", "1", None).await.unwrap();
        assert!(tier.get("expiring").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;
        tier.cache.run_pending_tasks().await;

        assert!(tier.get("expiring").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expire_reports_existence() {
        let tier = MemoryTier::new(100, Duration::from_secs(60));
        tier.set("present", "1", None).await.unwrap();
        assert!(tier.expire("present", Duration::from_secs(1)).await.unwrap());
        assert!(!tier.expire("absent", Duration::from_secs(1)).await.unwrap());
    }
}
