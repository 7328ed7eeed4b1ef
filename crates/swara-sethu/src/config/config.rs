//! Configuration management for swara-sethu.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, serde defaults for missing fields, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{ClientConfig, GeminiConfig, ProgressConfig, ServerConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Proxy server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Classification endpoint settings.
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Analyze command settings.
    #[serde(default)]
    pub client: ClientConfig,
    /// Cosmetic stage pacing.
    #[serde(default)]
    pub progress: ProgressConfig,
}

impl Config {
    /// Load configuration from `path`, or from the platform config directory
    /// when `None`. A missing file is created with defaults.
    #[track_caller]
    #[instrument]
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!(config_path = ?config_path, "No config found, creating default");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Read and parse an existing configuration file.
    #[track_caller]
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config {:?}: {}", config_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config {:?}: {}", config_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!(config_dir = ?parent, "Created config directory");
            }
        }

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Proxy URL for the analyze command.
    ///
    /// Falls back to the local server address; a wildcard bind address is
    /// reached through loopback.
    pub fn proxy_url(&self) -> String {
        if let Some(url) = &self.client.proxy_url {
            return url.clone();
        }

        let host = match self.server.bind_address.as_str() {
            "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
            other => other,
        };

        format!("http://{}:{}", host, self.server.port)
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "swara-sethu", "Swara-Sethu").ok_or_else(|| {
                AppError::ConfigError {
                    reason: "Failed to get config directory".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
