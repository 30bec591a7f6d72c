//! Project-wide settings for UI snapshot tests, read from `ui-snapshot.toml`.
//!
//! `SnapshotTest::discover` in the engine crate picks the file up from the
//! working directory; a loaded [`Config`] can also be passed to
//! `SnapshotTest::from_config` directly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`Config::discover`].
pub const CONFIG_FILE_NAME: &str = "ui-snapshot.toml";

/// Snapshot directory used when nothing overrides it.
pub const DEFAULT_SNAPSHOTS_DIR: &str = "__snapshots__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Project-wide snapshot settings.
///
/// Individual test groups can still override the directory in code; this only
/// changes the default they start from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_snapshots_dir")]
    pub snapshots_dir: PathBuf,
}

fn default_snapshots_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOTS_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshots_dir: default_snapshots_dir(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.snapshots_dir =
            Self::expand_path(&config.snapshots_dir).unwrap_or(config.snapshots_dir);

        Ok(Some(config))
    }

    /// Loads `ui-snapshot.toml` from `dir`, if there is one.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path_in(dir))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path_in<P: AsRef<Path>>(dir: P) -> PathBuf {
        dir.as_ref().join(CONFIG_FILE_NAME)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
