use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::source::DEFAULT_ENDPOINT;

const APP_DIR_NAME: &str = "corkboard";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "corkboard.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User settings from `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Feed URL to load the board from.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Where the interactive board writes its log.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// `<config_dir>/corkboard/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// A missing default file is fine; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Flag beats config file beats the built-in feed.
    pub fn endpoint(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Configured log file, else `<state_dir or cache_dir>/corkboard/corkboard.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::state_dir()
                .or_else(dirs::cache_dir)
                .map(|d| d.join(APP_DIR_NAME).join(LOG_FILE_NAME))
        })
    }
}
