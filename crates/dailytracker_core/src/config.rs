//! Runtime configuration loaded from environment variables.
//!
//! # Environment Variables
//! - `DAILYTRACKER_DB_PATH` - SQLite file path (default: `<temp_dir>/dailytracker.sqlite3`)
//! - `DAILYTRACKER_LOG_LEVEL` - `trace|debug|info|warn|error` (default: build-mode dependent)
//! - `DAILYTRACKER_LOG_DIR` - absolute log directory; file logging stays off when unset

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "DAILYTRACKER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "DAILYTRACKER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DAILYTRACKER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "dailytracker.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidEnvVar { name: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEnvVar { name, reason } => {
                write!(f, "invalid environment variable {name}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl TrackerConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(|reason| {
                ConfigError::InvalidEnvVar {
                    name: ENV_LOG_LEVEL,
                    reason,
                }
            })?;
        }

        if let Some(dir) = read(ENV_LOG_DIR) {
            let dir = PathBuf::from(dir);
            if !dir.is_absolute() {
                return Err(ConfigError::InvalidEnvVar {
                    name: ENV_LOG_DIR,
                    reason: format!("must be an absolute path, got `{}`", dir.display()),
                });
            }
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}
