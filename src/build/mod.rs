//! Remote build service abstraction
//!
//! The build service answers a build request in one of three ways: the
//! finished container, "locked" because an identical build is already
//! running, or an error. Waiting for a locked build is not this module's
//! concern; see [`Maker`](crate::Maker).

pub mod http;

pub use http::HttpBuildService;

use crate::error::MakerResult;
use crate::key::CacheKey;
use crate::options::MakeOptions;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// JSON body sent to the build service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildPayload {
    pub remote: String,
    pub sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tailf: Option<bool>,
}

/// A build request with its derived key
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Request body
    pub payload: BuildPayload,

    /// Authorization header value
    pub bearer: Option<String>,

    /// Derived key, for log correlation only; never sent
    pub key: CacheKey,
}

impl BuildRequest {
    pub fn new(remote: &str, sha: &str, options: &MakeOptions, key: CacheKey) -> Self {
        Self {
            payload: BuildPayload {
                remote: remote.to_string(),
                sha: sha.to_string(),
                blob: options.blob.clone(),
                filename: options.filename.clone(),
                token: options.token.clone(),
                cache: options.cache,
                tailf: options.tailf,
            },
            bearer: options.bearer.clone(),
            key,
        }
    }
}

/// How the build service answered
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// 200: the container, verbatim
    Success(Value),

    /// 423: an identical build is already running
    InProgress,

    /// Anything else
    Failure {
        status: u16,
        /// The body's `error` field, if any
        error: Option<String>,
    },
}

impl BuildOutcome {
    /// Classify a response by status code and body
    ///
    /// A 200 body that is not JSON is passed through as a string; an empty
    /// one as `null`.
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            200 => Self::Success(passthrough_body(body)),
            423 => Self::InProgress,
            _ => {
                let error = serde_json::from_str::<Value>(body)
                    .ok()
                    .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string));
                Self::Failure { status, error }
            }
        }
    }
}

fn passthrough_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Remote build service interface
#[async_trait]
pub trait BuildService: Send + Sync {
    /// Send one build request. Never polls or retries.
    async fn request(&self, request: &BuildRequest) -> MakerResult<BuildOutcome>;
}
