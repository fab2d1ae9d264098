//! # Logging
//!
//! File-based structured logging for the Nodara client.
//!
//! - Daily-rotated log file in `NODARA_LOG_DIR` (default `logs/nodara.log`)
//! - Optional console output and JSON formatting
//! - Panic hook that records panics in the log before the default handler runs
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG` or `NODARA_LOG_LEVEL`: filter (e.g. `nodara=debug,info`)
//! - `NODARA_LOG_DIR`: log directory
//! - `NODARA_LOG_CONSOLE=1`: also log to stderr
//! - `NODARA_LOG_JSON=1`: one JSON object per line in the log file

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
