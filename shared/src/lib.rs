//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the Nodara mobile client and the
//! Nodara REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::api`]**: Response envelope shared by every endpoint
//!   - **[`dto::wallet`]**: Wallet balances, payments, swaps, contacts
//!   - **[`dto::devices`]**: Device registry, health and maintenance
//!   - **[`dto::analytics`]**: Network, node and service analytics
//! - **[`utils`]**: Display helpers (address truncation, SOL formatting)
//!
//! ## Wire Format
//!
//! The Nodara API speaks camelCase JSON, so every struct carries
//! `#[serde(rename_all = "camelCase")]`. Optional fields are omitted when
//! `None`, enums serialize to lowercase strings.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::api::ApiResponse;
//! use shared::dto::devices::Device;
//!
//! let raw = r#"{"data": [], "success": true}"#;
//! let response: ApiResponse<Vec<Device>> = serde_json::from_str(raw).unwrap();
//! let devices = response.into_result().unwrap();
//! assert!(devices.is_empty());
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
