//! Process configuration.
//!
//! The diary takes no flags and reads no environment; every path is fixed
//! relative to a base directory (the working directory in the CLI).

use crate::logging::default_log_level;
use std::io;
use std::path::{Path, PathBuf};

/// Storage file name inside the base directory.
pub const DB_FILE_NAME: &str = "diary.db";
/// Log directory name inside the base directory.
pub const LOG_DIR_NAME: &str = "diary_logs";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Resolves all paths under `base`.
    pub fn in_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            db_path: base.join(DB_FILE_NAME),
            log_dir: base.join(LOG_DIR_NAME),
            log_level: default_log_level(),
        }
    }

    /// Resolves all paths under the process working directory.
    pub fn from_current_dir() -> io::Result<Self> {
        Ok(Self::in_dir(std::env::current_dir()?))
    }
}
