//! Logging configuration from environment variables

use lib_utils::envs::{get_env_bool, get_env_or};
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "nodara.log";
pub const DEFAULT_LOG_FILTER: &str = "nodara=info,lib_solana=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log file name prefix inside `log_dir`
    pub file_name: String,
    /// Filter directive (e.g., "nodara=debug,info")
    pub log_level: String,
    /// Mirror log output to stderr
    pub console: bool,
    /// JSON lines instead of text in the log file
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            file_name: LOG_FILE_NAME.to_string(),
            log_level: DEFAULT_LOG_FILTER.to_string(),
            console: false,
            json: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let log_level = match std::env::var("RUST_LOG") {
            Ok(filter) if !filter.trim().is_empty() => filter,
            _ => get_env_or("NODARA_LOG_LEVEL", DEFAULT_LOG_FILTER),
        };

        Self {
            log_dir: PathBuf::from(get_env_or("NODARA_LOG_DIR", "logs")),
            file_name: LOG_FILE_NAME.to_string(),
            log_level,
            console: get_env_bool("NODARA_LOG_CONSOLE"),
            json: get_env_bool("NODARA_LOG_JSON"),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(&self.file_name)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
