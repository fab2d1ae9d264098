//! # Nodara REST API Module
//!
//! HTTP client for the Nodara REST API plus one module of typed endpoint
//! functions per API area.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and documentation
//! ├── client.rs     - ApiClient, headers, verbs, error mapping
//! ├── wallet.rs     - Balances, payments, swaps, contacts, preferences
//! ├── devices.rs    - Device registry, performance, services, logs, alerts
//! └── analytics.rs  - Network, node and service analytics
//! ```
//!
//! Endpoint functions are called module-qualified:
//!
//! ```rust,no_run
//! # async fn demo(client: &nodara::services::api::ApiClient) -> Result<(), String> {
//! use nodara::services::api::{devices, wallet};
//!
//! let balance = wallet::get_balance(client, "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM").await?;
//! let stats = devices::get_device_stats(client).await?;
//! println!("{} SOL across {} devices", balance.sol, stats.total_devices);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod client;
pub mod devices;
pub mod wallet;

pub use client::ApiClient;
