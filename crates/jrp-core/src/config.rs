//! Configuration types and loading for jrp.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::Error;

/// Environment variable overriding the WordNet data directory.
pub const WORDNET_DIR_ENV: &str = "JRP_WORDNETJP_DIR";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the history database.
    pub database: PathBuf,

    /// Directory holding the WordNet database file.
    pub wordnet_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jrp");

        Self {
            database: data_dir.join("jrp.db"),
            wordnet_dir: data_dir,
        }
    }
}

impl Config {
    /// Load configuration from the default config file.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            let mut config = Self::default();
            config.apply_env();
            Ok(config)
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.expand_paths();
        config.apply_env();
        Ok(config)
    }

    /// Get the default config file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jrp")
            .join("config.toml")
    }

    /// Save configuration to a specific file path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Ensure config exists at the given path, creating defaults if missing.
    pub fn ensure_at(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_path(path)
        } else {
            let mut config = Self::default();
            config.save_to_path(path)?;
            config.apply_env();
            Ok(config)
        }
    }

    /// Expand a path, replacing ~ and environment variables.
    pub fn expand_path(path: &str) -> PathBuf {
        let expanded = shellexpand::full(path)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| path.to_string());
        PathBuf::from(expanded)
    }

    /// Path of the WordNet database file under the configured directory.
    pub fn wordnet_db_path(&self) -> PathBuf {
        self.wordnet_dir.join(crate::wordnet::WORDNET_DB_FILE)
    }

    fn expand_paths(&mut self) {
        self.database = Self::expand_path(&self.database.to_string_lossy());
        self.wordnet_dir = Self::expand_path(&self.wordnet_dir.to_string_lossy());
    }

    /// The environment override beats whatever the config file says.
    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(WORDNET_DIR_ENV) {
            if !dir.is_empty() {
                self.wordnet_dir = Self::expand_path(&dir);
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
