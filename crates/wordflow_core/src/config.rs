//! Application configuration.
//!
//! Resolution order: built-in defaults, then an optional JSON file, then
//! `WORDFLOW_*` environment variables. The CLI applies its flags last.

use crate::board::BoardOptions;
use crate::logging::default_log_level;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "WORDFLOW_DB";
pub const ENV_LOG_LEVEL: &str = "WORDFLOW_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "WORDFLOW_LOG_DIR";

const DEFAULT_DB_FILE: &str = "wordflow.sqlite3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_level: String,
    /// File logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub board: BoardOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
            board: BoardOptions::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidBoard(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::InvalidBoard(message) => write!(f, "invalid board options: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidBoard(_) => None,
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid by `path` when given, then by the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("event=config_load module=config status=ok path={}", path.display());
        Ok(config)
    }

    /// Overrides fields from `WORDFLOW_*` variables resolved through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(db) = non_empty(lookup(ENV_DB_PATH)) {
            self.database_path = PathBuf::from(db);
        }
        if let Some(level) = non_empty(lookup(ENV_LOG_LEVEL)) {
            self.log_level = level;
        }
        if let Some(dir) = non_empty(lookup(ENV_LOG_DIR)) {
            self.log_dir = Some(PathBuf::from(dir));
        }
    }

    /// Board options must describe a drawable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.board;
        if !board.density.is_finite() || board.density < 0.0 {
            return Err(ConfigError::InvalidBoard(format!(
                "density must be a finite value >= 0, got {}",
                board.density
            )));
        }
        let range = board.speed_range_sec;
        if !(range.min.is_finite() && range.max.is_finite()) || range.min < 0.0 {
            return Err(ConfigError::InvalidBoard(
                "speed range bounds must be finite and non-negative".to_string(),
            ));
        }
        if range.min > range.max {
            return Err(ConfigError::InvalidBoard(format!(
                "speed range min {} exceeds max {}",
                range.min, range.max
            )));
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Some(_) => {
            warn!("event=config_env module=config status=ignored reason=empty_value");
            None
        }
        None => None,
    }
}
