//! Configuration file loading for the chessbot CLI.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for an interactive session.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ChessbotConfig {
    /// Search depth in plies for engine moves. Defaults to 3.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Print the board after every move. Defaults to true.
    #[serde(default = "default_show_board")]
    pub show_board: bool,
}

fn default_depth() -> u32 {
    3
}

fn default_show_board() -> bool {
    true
}

impl Default for ChessbotConfig {
    fn default() -> Self {
        ChessbotConfig {
            depth: default_depth(),
            show_board: default_show_board(),
        }
    }
}

impl ChessbotConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chessbot.toml")
    }
}
