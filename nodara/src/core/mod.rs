//! # Core Abstractions
//!
//! Core traits and error types shared by the services and the app layer.
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`service`]**: Seam traits for dependency injection (`IdentityProvider`,
//!   `EmbeddedWallet`, `ExternalSigner`, `EnvironmentProbe`, `SignerNamespace`,
//!   `KeyValueStore`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nodara::core::service::KeyValueStore;
//! use nodara::services::storage::{FileStore, MemoryStore};
//!
//! // In production: a JSON file in the data directory
//! let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new("data/wallet-store.json"));
//!
//! // In tests: an in-memory map
//! let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{
    EmbeddedWallet, EnvironmentProbe, ExternalSigner, IdentityProvider, IdentityUser,
    KeyValueStore, SignerNamespace,
};
