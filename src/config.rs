//! Configuration loading and management
//!
//! Handles parsing of `tl.toml` configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tl.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// Store-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Data directory holding tasks.json and session.json. Falls back to
    /// the platform data dir when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path, the file must exist. Without one, a missing
    /// `tl.toml` in the working directory yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(Error::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
