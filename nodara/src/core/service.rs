//! # Service Traits
//!
//! Seams between the wallet layer and everything it does not own: the
//! identity provider, the wallets it manages, the external signer and its
//! discovery, and durable storage. Production code and tests plug different
//! implementations into the same orchestrator.

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use std::sync::Arc;

use crate::services::storage::StorageError;
use crate::services::wallet::WalletError;

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    pub id: String,
    pub email: Option<String>,
}

/// Identity provider that authenticates users and manages their embedded
/// wallets.
///
/// A present [`user`](IdentityProvider::user) means the user is
/// authenticated.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn user(&self) -> Option<IdentityUser>;

    async fn logout(&self) -> Result<(), WalletError>;

    /// Solana wallets the provider currently holds for the user.
    fn embedded_wallets(&self) -> Vec<Arc<dyn EmbeddedWallet>>;

    /// Create a new Solana wallet for the signed-in user.
    async fn create_embedded_wallet(&self) -> Result<Arc<dyn EmbeddedWallet>, WalletError>;
}

/// Wallet whose key is held by the identity provider.
#[async_trait]
pub trait EmbeddedWallet: Send + Sync {
    /// Base58 public key.
    fn address(&self) -> String;

    fn supports_message_signing(&self) -> bool;

    fn supports_transaction_signing(&self) -> bool;

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError>;

    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, WalletError>;
}

/// Extension-style signer (Phantom) reached through the signer namespace.
///
/// Signatures are returned as raw bytes; encoding for display is the
/// provider's job.
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    fn is_phantom(&self) -> bool;

    /// Key of the live session, if any.
    fn public_key(&self) -> Option<Pubkey>;

    /// True when the signer still holds a session from an earlier visit.
    fn is_connected(&self) -> bool;

    async fn connect(&self) -> Result<Pubkey, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, WalletError>;

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError>;
}

/// Finds the external signer in the running environment.
pub trait EnvironmentProbe: Send + Sync {
    /// `None` when no compatible signer is installed.
    fn discover(&self) -> Option<Arc<dyn ExternalSigner>>;
}

/// Named locations where signers register themselves, for example
/// `phantom.solana`.
pub trait SignerNamespace: Send + Sync {
    fn lookup(&self, path: &str) -> Option<Arc<dyn ExternalSigner>>;
}

/// String key-value storage that survives restarts.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
