//! Runtime configuration resolved from the environment.
//!
//! | variable            | default                          |
//! |---------------------|----------------------------------|
//! | `TODOEY_DB_PATH`    | `<temp dir>/todoey.sqlite3`      |
//! | `TODOEY_LOG_LEVEL`  | [`default_log_level`]            |
//! | `TODOEY_LOG_DIR`    | unset (file logging stays off)   |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, LogLevel, LoggingError};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TODOEY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TODOEY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TODOEY_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "todoey.sqlite3";

/// Where the store lives and how it logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(raw) => raw.parse::<LogLevel>()?,
            None => default_log_level(),
        };
        let log_dir = non_blank(LOG_DIR_ENV).map(PathBuf::from);

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
