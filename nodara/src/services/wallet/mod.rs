//! # Wallet Service
//!
//! Wallet connection layer: two capability providers and the orchestrator
//! that chooses between them.
//!
//! - [`embedded`]: wallet held by the identity provider (base64 signatures)
//! - [`external`]: Phantom-style signer found in the signer namespace (hex signatures)
//! - [`orchestrator`]: active-wallet selection, persistence, balance and history
//! - [`registry`]: in-process signer namespace
//! - [`identity`]: in-process identity providers
//!
//! ```text
//! UI action ──► WalletOrchestrator ──► EmbeddedProvider | ExternalProvider
//!                     │                        │
//!                     │                  ChainRpc (shared)
//!                     ▼
//!            watch::Sender<WalletSnapshot> ──► WalletContext subscribers
//! ```

pub mod embedded;
pub mod error;
pub mod external;
pub mod identity;
pub mod orchestrator;
mod reads;
pub mod registry;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use embedded::{EmbeddedProvider, KeypairWallet};
pub use error::WalletError;
pub use external::{ExternalProvider, NamespaceProbe};
pub use identity::{AnonymousIdentity, LocalIdentity};
pub use orchestrator::{WalletDeps, WalletOrchestrator};
pub use registry::SignerRegistry;
pub use types::{ConnectOutcome, SlotStatus, WalletCapability, WalletHandle, WalletKind, WalletSnapshot};
