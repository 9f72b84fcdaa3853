use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_SEGMENTS_KEY, DEFAULT_WORDS_KEY,
};
use crate::transcript::domain::granularity::Granularity;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings that select how a transcript is read and normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    pub granularity: Granularity,
    pub segments_key: String,
    pub words_key: String,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Word,
            segments_key: DEFAULT_SEGMENTS_KEY.to_string(),
            words_key: DEFAULT_WORDS_KEY.to_string(),
        }
    }
}

impl AlignConfig {
    /// Per-user config location, e.g. `~/.config/transcript-align/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given. Otherwise falls back to the per-user config
    /// when it exists, and to the defaults when it does not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(user_path) if user_path.exists() => {
                log::debug!("Loading config from {}", user_path.display());
                Self::load(&user_path)
            }
            _ => Ok(Self::default()),
        }
    }
}
