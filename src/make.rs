//! Request coalescing
//!
//! `make` turns `(remote, sha)` into a container:
//!
//! 1. Derive the key. A blob makes the request single-use.
//! 2. Reusable requests return a cached result when there is one.
//! 3. Otherwise ask the build service.
//! 4. If the service reports the same build already running, poll the cache
//!    every 500ms until the result appears or the deadline passes.
//!
//! Concurrent callers for the same reusable `(remote, sha)` share a hash.
//! The build service lets one of them build and answers the rest with
//! "locked"; those then wait on the shared cache tier, so the container is
//! built once. No state is kept here between calls.

use crate::build::{BuildOutcome, BuildRequest, BuildService, HttpBuildService};
use crate::cache::{MemoryTier, RedisTier, TieredCache};
use crate::config::Config;
use crate::error::{MakerError, MakerResult};
use crate::key::CacheKey;
use crate::options::{ExtendOptions, MakeOptions, SetOptions};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Interval between cache reads while waiting on a running build
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Deadline used when `started + timeout` is not representable
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Client for the build service and its result cache
///
/// Cheap to clone; clones share the cache tiers and the HTTP agent.
#[derive(Clone)]
pub struct Maker {
    cache: TieredCache,
    build: Arc<dyn BuildService>,
    poll_interval: Duration,
}

impl std::fmt::Debug for Maker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Maker")
            .field("cache", &self.cache)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Maker {
    pub fn new(cache: TieredCache, build: Arc<dyn BuildService>) -> Self {
        Self {
            cache,
            build,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Override the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Connect the cache tiers and build client described by `config`
    pub async fn connect(config: &Config) -> MakerResult<Self> {
        let fast = MemoryTier::new(
            config.cache.memory_capacity,
            Duration::from_secs(config.cache.memory_ttl_secs),
        );
        let shared = RedisTier::connect(
            &config.cache.redis_url,
            config.cache.shared_ttl_secs.map(Duration::from_secs),
        )
        .await?;
        let build = HttpBuildService::new(
            &config.build.url,
            Duration::from_secs(config.build.request_timeout_secs),
        );

        let cache = TieredCache::new(Arc::new(fast), Arc::new(shared));
        Ok(Self::new(cache, Arc::new(build))
            .with_poll_interval(Duration::from_millis(config.make.poll_interval_ms)))
    }

    /// Get the container for `(remote, sha)`, building it if needed
    pub async fn make(&self, remote: &str, sha: &str, options: MakeOptions) -> MakerResult<Value> {
        let key = self.key(remote, sha, &options)?;

        if !options.is_single_use() {
            if let Some(result) = self.cache.get(&key.hash).await? {
                debug!(key = %key.key, hash = %key.hash, "Cache hit");
                return Ok(result);
            }
        }

        self.make_new(remote, sha, &options, key).await
    }

    async fn make_new(
        &self,
        remote: &str,
        sha: &str,
        options: &MakeOptions,
        key: CacheKey,
    ) -> MakerResult<Value> {
        let request = BuildRequest::new(remote, sha, options, key);

        match self.build.request(&request).await? {
            BuildOutcome::Success(result) => {
                info!(key = %request.key.key, hash = %request.key.hash, "found container");
                Ok(result)
            }
            BuildOutcome::InProgress => {
                info!(key = %request.key.key, hash = %request.key.hash, "build in progress");
                let result = self.wait_for_build(&request.key, options.timeout).await?;
                info!(key = %request.key.key, hash = %request.key.hash, "build complete");
                Ok(result)
            }
            BuildOutcome::Failure { status, error } => Err(MakerError::BuildRequestFailed {
                status,
                message: error
                    .unwrap_or_else(|| format!("build request failed with status {}", status)),
            }),
        }
    }

    /// Poll the cache until the result appears or `timeout` elapses
    async fn wait_for_build(&self, key: &CacheKey, timeout: Duration) -> MakerResult<Value> {
        let started = Instant::now();
        let deadline = started
            .checked_add(timeout)
            .unwrap_or_else(|| started + FAR_FUTURE);

        loop {
            debug!(key = %key.key, hash = %key.hash, "waiting for build...");
            if let Some(result) = self.cache.get(&key.hash).await? {
                return Ok(result);
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(MakerError::BuildTimeout {
                    key: key.key.clone(),
                    hash: key.hash.clone(),
                    waited_ms: now.duration_since(started).as_millis() as u64,
                });
            }

            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    /// Derive the key and hash `make` would use for these inputs
    pub fn key(&self, remote: &str, sha: &str, options: &MakeOptions) -> MakerResult<CacheKey> {
        CacheKey::derive(remote, sha, options.is_single_use())
    }

    /// Read a cached result
    pub async fn get(&self, hash: &str) -> MakerResult<Option<Value>> {
        self.cache.get(hash).await
    }

    /// Cache a result under the `hash` field it carries
    pub async fn set(&self, result: &Value, options: SetOptions) -> MakerResult<()> {
        let hash = result
            .get("hash")
            .and_then(Value::as_str)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| MakerError::InvalidInput("result has no hash field".to_string()))?;

        self.cache.set(hash, result, options).await
    }

    /// Remove a cached result from both tiers
    pub async fn del(&self, hash: &str) -> MakerResult<()> {
        self.cache.del(hash).await
    }

    /// Extend the shared tier lifetime of a cached result
    pub async fn extend(&self, hash: &str, options: ExtendOptions) -> MakerResult<bool> {
        self.cache.extend(hash, options).await
    }
}
