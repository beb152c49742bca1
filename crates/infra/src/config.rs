//! Configuration loading and representation.
//!
//! | Env Var              | Default        |
//! |----------------------|----------------|
//! | `GEOPERM_CATALOG`    | `catalog.json` |
//! | `GEOPERM_LOG_FORMAT` | `text`         |
//!
//! Command-line flags override these values.

use std::path::PathBuf;

use thiserror::Error;

use geoperm_observability::{LogFormat, UnknownLogFormat};

pub const CATALOG_ENV: &str = "GEOPERM_CATALOG";
pub const LOG_FORMAT_ENV: &str = "GEOPERM_LOG_FORMAT";
pub const DEFAULT_CATALOG_PATH: &str = "catalog.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEOPERM_LOG_FORMAT: {0}")]
    LogFormat(#[from] UnknownLogFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(CATALOG_ENV).filter(|v| !v.trim().is_empty()) {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV).filter(|v| !v.trim().is_empty()) {
            config.log_format = format.parse()?;
        }

        Ok(config)
    }

    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.catalog_path = path;
        }
        self
    }
}
