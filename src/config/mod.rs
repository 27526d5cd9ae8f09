//! Configuration module for modpane
//!
//! Manages application configuration including the default browse root and
//! the tag store location. Configuration is stored in the user's config
//! directory.

use std::fs;
use std::path::PathBuf;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Path display format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    /// Display absolute paths
    #[default]
    Absolute,
    /// Display relative paths (relative to current directory)
    Relative,
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ModpaneConfig {
    /// Directory panes open in when none is given on the command line
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Tag store document; defaults to `.tags.json` in the home directory
    #[serde(default)]
    pub tag_store: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Default format for displaying paths (absolute or relative)
    #[serde(default)]
    pub path_format: PathFormat,
}

impl ModpaneConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be
    /// determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("modpane").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or
    /// created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be
    /// written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Resolve the tag store document path
    #[must_use]
    pub fn tag_store_path(&self) -> PathBuf {
        self.tag_store
            .clone()
            .unwrap_or_else(crate::tags::TagStore::default_path)
    }

    /// Resolve the browse root: explicit argument, configured root, or the
    /// current directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no root is given and the current directory
    /// cannot be determined.
    pub fn resolve_root(&self, arg: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = arg {
            return Ok(dir);
        }
        if let Some(dir) = &self.root {
            return Ok(dir.clone());
        }
        std::env::current_dir().map_err(|e| {
            ConfigError::Message(format!("Could not determine current directory: {e}"))
        })
    }
}
