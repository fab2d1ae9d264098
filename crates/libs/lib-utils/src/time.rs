//! # Time Utilities
//!
//! Conversions for Solana block times (Unix seconds).

use chrono::{DateTime, Utc};

/// Convert a block time in Unix seconds to a UTC timestamp.
pub fn from_epoch_secs(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Render an optional block time for display; `pending` when the cluster has
/// not reported one yet.
pub fn format_block_time(block_time: Option<i64>) -> String {
    block_time
        .and_then(from_epoch_secs)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "pending".to_string())
}
