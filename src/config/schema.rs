//! Configuration schema for Maker
//!
//! Configuration is stored at `~/.config/maker/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Build service settings
    pub build: BuildConfig,

    /// Cache tier settings
    pub cache: CacheConfig,

    /// Defaults for `make`
    pub make: MakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Build service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Base URL; requests go to `{url}/make`
    pub url: String,

    /// Transport timeout for one build request
    pub request_timeout_secs: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            request_timeout_secs: 300,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Fast tier TTL
    pub memory_ttl_secs: u64,

    /// Fast tier maximum entries
    pub memory_capacity: u64,

    /// Shared tier endpoint, including password and database
    pub redis_url: String,

    /// Default shared tier TTL (unset = no expiry)
    pub shared_ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_ttl_secs: 5,
            memory_capacity: 10_000,
            redis_url: "redis://127.0.0.1:6379/0".to_string(),
            shared_ttl_secs: None,
        }
    }
}

/// Defaults for make requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MakeConfig {
    /// How long to wait for an in-progress build
    pub timeout_ms: u64,

    /// Interval between cache reads while waiting
    pub poll_interval_ms: u64,
}

impl Default for MakeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 20_000,
            poll_interval_ms: 500,
        }
    }
}

/// Accepted values of `general.log_format`
pub const LOG_FORMATS: &[&str] = &["text", "json"];

impl Config {
    /// Check values that parse but cannot be used
    pub fn validate(&self) -> Result<(), String> {
        if !LOG_FORMATS.contains(&self.general.log_format.as_str()) {
            return Err(format!(
                "general.log_format must be one of {}, got {:?}",
                LOG_FORMATS.join(", "),
                self.general.log_format
            ));
        }
        if self.make.poll_interval_ms == 0 {
            return Err("make.poll_interval_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[build]"));
        assert!(toml.contains("[cache]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.make.timeout_ms, 20_000);
        assert_eq!(config.make.poll_interval_ms, 500);
        assert_eq!(config.cache.memory_ttl_secs, 5);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            redis_url = "redis://:secret@cache.internal:6379/2"
            shared_ttl_secs = 600
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.cache.redis_url, "redis://:secret@cache.internal:6379/2");
        assert_eq!(config.cache.shared_ttl_secs, Some(600));
        assert_eq!(config.build.url, "http://localhost:8080"); // default preserved
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn json_log_format_is_valid() {
        let config: Config = toml::from_str("[general]\nlog_format = \"json\"\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let config: Config = toml::from_str("[general]\nlog_format = \"yaml\"\n").unwrap();
        let reason = config.validate().unwrap_err();
        assert!(reason.contains("general.log_format"));
        assert!(reason.contains("yaml"));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config: Config = toml::from_str("[make]\npoll_interval_ms = 0\n").unwrap();
        let reason = config.validate().unwrap_err();
        assert!(reason.contains("make.poll_interval_ms"));
    }
}
