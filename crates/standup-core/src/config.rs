//! Configuration management for standup-tools.
//!
//! Handles loading and saving configuration from TOML files.
//! Config files are stored in platform-specific locations:
//!
//! - **macOS/Linux**: `~/.config/standup-tools/config.toml`
//! - **Windows**: `%APPDATA%\standup-tools\config.toml`
//!
//! A missing file is not an error; every field has a default.
//!
//! # Example
//!
//! ```ignore
//! use standup_core::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("commands.timeout_secs", "10")?;
//! config.save()?;
//! ```

use crate::locale::Locale;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config directory name.
const CONFIG_DIR_NAME: &str = "standup-tools";

/// Default per-command timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Configuration structures
// =============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Language of every user-facing string
    #[serde(default)]
    pub locale: Locale,

    /// External command settings
    #[serde(default)]
    pub commands: CommandsConfig,
}

/// Settings for the external `git` and `gh` processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Program used for version-control queries
    #[serde(default = "default_git")]
    pub git: String,
    /// Program used for GitHub queries
    #[serde(default = "default_gh")]
    pub gh: String,
    /// Per-command timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            git: default_git(),
            gh: default_gh(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_git() -> String {
    "git".to_string()
}

fn default_gh() -> String {
    "gh".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// =============================================================================
// Config implementation
// =============================================================================

impl Config {
    /// Get the configuration directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location.
    ///
    /// Returns a default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns a default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        debug!(path = ?path, "Loading config");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        info!(path = ?path, "Config loaded successfully");
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        debug!(path = ?path, "Saving config");

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        info!(path = ?path, "Config saved successfully");
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.commands.timeout_secs == 0 {
            return Err(Error::Config(
                "commands.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.commands.git.trim().is_empty() || self.commands.gh.trim().is_empty() {
            return Err(Error::Config(
                "commands.git and commands.gh must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set a configuration value by key path.
    ///
    /// Key format: `locale` or `commands.field` (e.g., `commands.gh`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "locale" => self.locale = value.parse()?,
            "commands.git" => self.commands.git = value.to_string(),
            "commands.gh" => self.commands.gh = value.to_string(),
            "commands.timeout_secs" | "commands.timeout" => {
                self.commands.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout '{}': expected seconds", value))
                })?;
            }
            _ => return Err(Error::Config(format!("Unknown config key: {}", key))),
        }

        self.validate()
    }

    /// Get a configuration value by key path.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "locale" => Ok(self.locale.to_string()),
            "commands.git" => Ok(self.commands.git.clone()),
            "commands.gh" => Ok(self.commands.gh.clone()),
            "commands.timeout_secs" | "commands.timeout" => {
                Ok(self.commands.timeout_secs.to_string())
            }
            _ => Err(Error::Config(format!("Unknown config key: {}", key))),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
