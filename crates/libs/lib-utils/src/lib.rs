//! # Utilities Library
//!
//! Small helpers shared by the Nodara crates: environment variables, base64,
//! block-time formatting and async retry with exponential backoff.

pub mod b64;
pub mod envs;
pub mod retry;
pub mod time;

// Re-export commonly used functions
pub use b64::{b64_decode, b64_encode};
pub use envs::{get_env, get_env_bool, get_env_or, get_env_parse};
pub use retry::{backoff_delay, retry};
pub use time::{format_block_time, from_epoch_secs};
