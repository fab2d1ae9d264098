//! Service layer: REST API, durable storage and the wallet connection layer.

pub mod api;
pub mod storage;
pub mod wallet;

pub use api::ApiClient;
pub use storage::{FileStore, MemoryStore, StorageError};
