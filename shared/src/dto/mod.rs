//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the Nodara REST API.
//!
//! ## Module Organization
//!
//! - [`api`] - `{data, success, error?}` envelope
//! - [`wallet`] - Balances, transactions, payments, swaps, preferences
//! - [`devices`] - Device registration, status, logs and alerts
//! - [`analytics`] - Network/node/service metrics and health
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /devices/stats
//!
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "totalDevices": 12,
//!   "onlineDevices": 9,
//!   "totalEarnings": 412.5,
//!   "averageUptime": 97.2
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod devices;
pub mod wallet;

pub use analytics::*;
pub use api::*;
pub use devices::*;
pub use wallet::*;
