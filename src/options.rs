//! Per-operation options
//!
//! Every optional field is named here with its default, so callers never
//! pass loosely-typed option bags.

use std::time::Duration;

/// Default deadline for waiting on an in-progress build
pub const DEFAULT_MAKE_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Options for [`Maker::make`](crate::Maker::make)
#[derive(Debug, Clone)]
pub struct MakeOptions {
    /// Inline payload. Its presence makes the request single-use.
    pub blob: Option<String>,

    /// File name for the inline payload
    pub filename: Option<String>,

    /// Token forwarded to the build service (e.g. for private remotes)
    pub token: Option<String>,

    /// Authorization header value for the build request
    pub bearer: Option<String>,

    /// Cache hint passed through to the build service
    pub cache: Option<bool>,

    /// Log-follow hint passed through to the build service
    pub tailf: Option<bool>,

    /// How long to poll the cache for an in-progress build
    pub timeout: Duration,
}

impl Default for MakeOptions {
    fn default() -> Self {
        Self {
            blob: None,
            filename: None,
            token: None,
            bearer: None,
            cache: None,
            tailf: None,
            timeout: DEFAULT_MAKE_TIMEOUT,
        }
    }
}

impl MakeOptions {
    pub fn with_blob(mut self, blob: impl Into<String>) -> Self {
        self.blob = Some(blob.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_bearer(mut self, bearer: impl Into<String>) -> Self {
        self.bearer = Some(bearer.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A request carrying a blob must never share a cache entry
    pub fn is_single_use(&self) -> bool {
        self.blob.is_some()
    }
}

/// Options for [`TieredCache::set`](crate::cache::TieredCache::set)
#[derive(Debug, Clone, Copy, Default)]
pub struct SetOptions {
    /// Shared tier TTL override. The fast tier always uses its own fixed TTL.
    pub ttl: Option<Duration>,
}

/// Options for [`TieredCache::extend`](crate::cache::TieredCache::extend)
#[derive(Debug, Clone, Copy)]
pub struct ExtendOptions {
    /// New time-to-live for the shared tier entry
    pub ttl: Duration,
}
