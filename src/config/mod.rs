//! Configuration loading for Maker
//!
//! A single TOML file, `~/.config/maker/config.toml` unless `--config` says
//! otherwise. A missing file means defaults. A file that parses but carries
//! unusable values is rejected the same way as one that does not parse, with
//! the offending path in the error.

pub mod schema;

pub use schema::Config;

use crate::error::{MakerError, MakerResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Reads and writes the config file at one path
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for the per-user config file
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Manager for an explicit config file
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// `<config dir>/maker/config.toml`, or `./maker/config.toml` when the
    /// platform has no config dir
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("maker")
            .join("config.toml")
    }

    /// Load and validate the config file, or defaults if there is none
    pub async fn load(&self) -> MakerResult<Config> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.config_path.display(), "No config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(MakerError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                ))
            }
        };

        let config = toml::from_str(&content).map_err(|e| self.invalid(e.to_string()))?;
        self.check(&config)?;

        debug!(path = %self.config_path.display(), "Loaded config");
        Ok(config)
    }

    /// Validate and write a config, creating the config directory if needed
    pub async fn save(&self, config: &Config) -> MakerResult<()> {
        self.check(config)?;
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            MakerError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Path this manager reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn check(&self, config: &Config) -> MakerResult<()> {
        config.validate().map_err(|reason| self.invalid(reason))
    }

    fn invalid(&self, reason: String) -> MakerError {
        MakerError::ConfigInvalid {
            path: self.config_path.clone(),
            reason,
        }
    }

    async fn ensure_config_dir(&self) -> MakerResult<()> {
        let Some(dir) = self
            .config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
        else {
            return Ok(());
        };

        fs::create_dir_all(dir).await.map_err(|e| {
            MakerError::io(format!("creating config directory {}", dir.display()), e)
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_in(temp: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp.path().join("config.toml"))
    }

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("nonexistent.toml"));

        let config = manager.load().await.unwrap();
        assert_eq!(config.build.url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("nested").join("config.toml"));

        let mut config = Config::default();
        config.build.url = "https://make.internal".to_string();

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.build.url, "https://make.internal");
    }

    #[tokio::test]
    async fn invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let manager = manager_in(&temp);
        std::fs::write(manager.path(), "[make]\ntimeout_ms = \"soon\"\n").unwrap();

        let err = manager.load().await.unwrap_err();
        assert!(matches!(err, MakerError::ConfigInvalid { path: p, .. } if p == manager.path()));
    }

    #[tokio::test]
    async fn zero_poll_interval_is_rejected_on_load() {
        let temp = TempDir::new().unwrap();
        let manager = manager_in(&temp);
        std::fs::write(manager.path(), "[make]\npoll_interval_ms = 0\n").unwrap();

        match manager.load().await.unwrap_err() {
            MakerError::ConfigInvalid { path, reason } => {
                assert_eq!(path, manager.path());
                assert!(reason.contains("poll_interval_ms"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_log_format_is_rejected_on_load() {
        let temp = TempDir::new().unwrap();
        let manager = manager_in(&temp);
        std::fs::write(manager.path(), "[general]\nlog_format = \"xml\"\n").unwrap();

        let err = manager.load().await.unwrap_err();
        assert!(matches!(
            err,
            MakerError::ConfigInvalid { ref reason, .. } if reason.contains("log_format")
        ));
    }

    #[tokio::test]
    async fn save_rejects_invalid_config_without_writing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("nested").join("config.toml"));

        let mut config = Config::default();
        config.make.poll_interval_ms = 0;

        assert!(matches!(
            manager.save(&config).await,
            Err(MakerError::ConfigInvalid { .. })
        ));
        assert!(!manager.path().exists());
        assert!(!temp.path().join("nested").exists());
    }
}
