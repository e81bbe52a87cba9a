//! Demo binary configuration
//!
//! Stored as TOML under `~/.config/joyinput/config.toml`. A missing file is
//! created with defaults on first start; a missing field falls back to its
//! default.

use crate::addressing::{PlayerIndex, MAX_PLAYERS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = ".config/joyinput";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct JoyInputConfig {
    /// Length of one polling cycle in milliseconds
    pub poll_interval_ms: u64,

    /// Number of player slots handed out to gamepads (1..=4)
    pub max_players: PlayerIndex,

    /// Log a player's report only when it changed since the last cycle
    pub report_changes_only: bool,
}

impl Default for JoyInputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 16, // one frame at 60 Hz
            max_players: MAX_PLAYERS,
            report_changes_only: true,
        }
    }
}

impl JoyInputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.max_players == 0 || self.max_players > MAX_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "max_players must be within 1..={}, got {}",
                MAX_PLAYERS, self.max_players
            )));
        }
        Ok(())
    }

    /// Reads and validates the config at `path`.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Config written to {}", path.display());
        Ok(())
    }

    /// Writes the default config to `path` unless a file already exists there.
    pub async fn ensure_default_config(path: &Path) -> Result<(), ConfigError> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if !exists {
            info!("No config at {}, creating defaults", path.display());
            Self::default().save(path).await?;
        }
        Ok(())
    }

    /// Ensures a config exists at `path` and loads it.
    pub async fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        Self::ensure_default_config(path).await?;
        Self::load(path).await
    }
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    let mut path = get_home_dir();
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    path
}

fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        warn!("Could not determine home directory, using current directory");
        PathBuf::from(".")
    })
}
