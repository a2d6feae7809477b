//! Error types for Maker
//!
//! All modules use `MakerResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Maker operations
pub type MakerResult<T> = Result<T, MakerError>;

/// All errors that can occur in Maker
#[derive(Error, Debug)]
pub enum MakerError {
    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Cache errors
    #[error("Cache tier {tier} unavailable: {reason}")]
    StorageUnavailable { tier: &'static str, reason: String },

    // Build service errors
    #[error("{message}")]
    BuildRequestFailed { status: u16, message: String },

    #[error("Build timed out after {waited_ms}ms waiting for {key} ({hash})")]
    BuildTimeout {
        key: String,
        hash: String,
        waited_ms: u64,
    },

    #[error("Build service unreachable: {0}")]
    BuildTransport(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MakerError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a storage error for the named tier
    pub fn storage(tier: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable {
            tier,
            reason: reason.to_string(),
        }
    }

    /// Check if error is retryable
    ///
    /// A timed out wait may succeed later since the remote build keeps
    /// running; a rejected build will not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::BuildTimeout { .. } | Self::StorageUnavailable { .. } | Self::BuildTransport(_)
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::BuildTimeout { .. } => {
                Some("The build is still running remotely; retry or raise --timeout-ms")
            }
            Self::StorageUnavailable { .. } => Some("Check --redis-url or cache.redis_url"),
            Self::BuildTransport(_) => Some("Check --build-url or build.url"),
            _ => None,
        }
    }
}
