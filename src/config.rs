//! Game configuration and file I/O errors.
//!
//! Configuration is an optional TOML file:
//!
//! ```toml
//! seed = 42
//! echo_log = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dice::SeededDice;

/// Errors reading or writing configuration and saved games.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid game state: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_echo_log() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Dice seed. A time-derived seed is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether the front end prints the event log as it grows.
    #[serde(default = "default_echo_log")]
    pub echo_log: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { seed: None, echo_log: default_echo_log() }
    }
}

impl GameConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        GameConfig::from_toml(&text)
    }

    /// Dice for a new game under this configuration.
    pub fn dice(&self) -> SeededDice {
        match self.seed {
            Some(seed) => SeededDice::new(seed),
            None => SeededDice::from_time(),
        }
    }
}
