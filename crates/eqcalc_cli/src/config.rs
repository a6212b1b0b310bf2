use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "eqcalc_config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    pub prompt: String,
    pub max_history_size: usize,
    /// Load and save `~/.eqcalc_history`
    pub history_file: bool,
    pub show_banner: bool,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            max_history_size: 100,
            history_file: true,
            show_banner: true,
        }
    }
}

impl CalcConfig {
    /// Read a config file. Keys that are absent keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `explicit` if given, otherwise [`DEFAULT_CONFIG_PATH`] when it
    /// exists. Any failure falls back to the defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    return Self::default();
                }
                default
            }
        };

        match Self::from_file(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "config loaded");
                config
            }
            Err(err) => {
                tracing::warn!("{}. Using defaults.", err);
                Self::default()
            }
        }
    }
}
