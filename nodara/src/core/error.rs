//! # Common Error Types
//!
//! Application-wide error type for everything above the wallet layer.
//!
//! ## Error Categories
//!
//! - **Api**: REST API communication errors (network, HTTP, JSON parsing)
//! - **Wallet**: wallet provider and orchestrator failures
//! - **Storage**: durable key-value store failures
//! - **Config**: invalid or missing configuration
//! - **Validation**: invalid user input (addresses, amounts)
//!
//! ## Error Conversion
//!
//! - `String` → `AppError::Api` (the REST helpers report errors as strings)
//! - `WalletError` → `AppError::Wallet`
//! - `StorageError` → `AppError::Storage`

use thiserror::Error;

use crate::services::storage::StorageError;
use crate::services::wallet::WalletError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Api(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Api(msg.to_string())
    }
}
