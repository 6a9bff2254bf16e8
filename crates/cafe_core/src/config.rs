//! Process configuration for embedding the café core.
//!
//! # Environment variables
//! - `CAFE_DB_PATH`: SQLite file path. Unset means an in-memory store.
//! - `CAFE_LOG_LEVEL`: `trace|debug|info|warn|error`. Defaults to
//!   [`default_log_level`].
//! - `CAFE_LOG_DIR`: absolute directory for rolling logs. Unset disables
//!   file logging.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::logging::{default_log_level, init_logging, LoggingError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CAFE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "CAFE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CAFE_LOG_DIR";

/// Inputs needed to bring up a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

/// Errors from [`bootstrap`].
#[derive(Debug)]
pub enum ConfigError {
    Logging(LoggingError),
    Db(DbError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "logging setup failed: {err}"),
            Self::Db(err) => write!(f, "store setup failed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Starts logging (when a directory is configured) and opens the store.
pub fn bootstrap(config: &CoreConfig) -> Result<Connection, ConfigError> {
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }
    let conn = match config.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    Ok(conn)
}
