//! Runtime configuration read from the environment (and an optional `.env`
//! file loaded by `main`).

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::LevelFilter;

use crate::store::default_data_dir;

/// Overrides the directory holding the snapshots and CSV exports.
pub const DATA_DIR_VAR: &str = "GRADE_TRACKER_DATA_DIR";
/// Log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
pub const LOG_LEVEL_VAR: &str = "GRADE_TRACKER_LOG";

/// Settings the binary needs before it touches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the snapshots and CSV exports.
    pub data_dir: PathBuf,
    /// Maximum level passed to the terminal logger.
    pub log_level: LevelFilter,
}

impl Config {
    /// Read both settings from the process environment, falling back to
    /// `~/.grade-tracker` and `info`.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var(DATA_DIR_VAR).ok(),
            std::env::var(LOG_LEVEL_VAR).ok(),
        )
    }

    fn from_values(data_dir: Option<String>, log_level: Option<String>) -> Result<Self> {
        let data_dir = match data_dir.filter(|value| !value.trim().is_empty()) {
            Some(value) => PathBuf::from(value),
            None => default_data_dir()?,
        };

        let log_level = match log_level.filter(|value| !value.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| anyhow!("invalid {LOG_LEVEL_VAR} value '{value}'"))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            data_dir,
            log_level,
        })
    }
}
