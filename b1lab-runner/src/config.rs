//! Screen configuration, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating a [`ScreenConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("min_bars must be at least 1")]
    ZeroMinBars,

    #[error("workers must be at least 1")]
    ZeroWorkers,

    #[error("history_bars ({history_bars}) must not be smaller than min_bars ({min_bars})")]
    HistoryShorterThanMinimum { history_bars: usize, min_bars: usize },
}

/// Everything a screening run needs. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    /// Directory of `<code>.csv` bar files.
    pub data_dir: PathBuf,

    /// Where the JSON report is written.
    pub output_dir: PathBuf,

    /// Instruments with fewer bars are skipped, not evaluated.
    pub min_bars: usize,

    /// Only the trailing `history_bars` bars are evaluated.
    pub history_bars: usize,

    /// Size of the evaluation thread pool.
    pub workers: usize,

    /// Optional allow-list of codes. Empty means every file in `data_dir`.
    pub codes: Vec<String>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("results"),
            min_bars: 120,
            history_bars: 300,
            workers: 4,
            codes: Vec::new(),
        }
    }
}

impl ScreenConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_bars == 0 {
            return Err(ConfigError::ZeroMinBars);
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.history_bars < self.min_bars {
            return Err(ConfigError::HistoryShorterThanMinimum {
                history_bars: self.history_bars,
                min_bars: self.min_bars,
            });
        }
        Ok(())
    }
}
