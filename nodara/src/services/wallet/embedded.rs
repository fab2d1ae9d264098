//! # Embedded Wallet Provider
//!
//! Wallet whose key is held by the identity provider. The provider never
//! talks to the network; sending and confirming signed transactions is the
//! orchestrator's job.
//!
//! [`KeypairWallet`] is the in-process [`EmbeddedWallet`] used by
//! [`LocalIdentity`](super::identity::LocalIdentity).

use async_trait::async_trait;
use parking_lot::RwLock;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::WalletError;
use super::types::{SlotStatus, WalletCapability, WalletHandle, WalletKind};
use crate::core::service::{EmbeddedWallet, IdentityProvider};

#[derive(Default)]
struct EmbeddedState {
    signer: Option<Arc<dyn EmbeddedWallet>>,
    capability: Option<WalletCapability>,
    handle: Option<WalletHandle>,
    status: SlotStatus,
}

pub struct EmbeddedProvider {
    identity: Arc<dyn IdentityProvider>,
    state: RwLock<EmbeddedState>,
}

impl EmbeddedProvider {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            state: RwLock::new(EmbeddedState::default()),
        }
    }

    pub fn handle(&self) -> Option<WalletHandle> {
        self.state.read().handle.clone()
    }

    pub fn status(&self) -> SlotStatus {
        self.state.read().status
    }

    pub fn capability(&self) -> Option<WalletCapability> {
        self.state.read().capability
    }

    fn attach(&self, wallet: Arc<dyn EmbeddedWallet>) -> WalletHandle {
        let capability = WalletCapability {
            kind: WalletKind::Embedded,
            can_sign_message: wallet.supports_message_signing(),
            can_sign_transaction: wallet.supports_transaction_signing(),
        };
        let handle = WalletHandle::new(WalletKind::Embedded, wallet.address());

        let mut state = self.state.write();
        state.signer = Some(wallet);
        state.capability = Some(capability);
        state.handle = Some(handle.clone());
        state.status = SlotStatus::Connected;
        handle
    }

    /// Attach the first wallet the identity provider already holds.
    pub fn sync_from_identity(&self) -> Option<WalletHandle> {
        let wallet = self.identity.embedded_wallets().into_iter().next()?;
        let handle = self.attach(wallet);
        debug!(address = %handle.address, "Attached existing embedded wallet");
        Some(handle)
    }

    /// Create a wallet for the signed-in user.
    pub async fn create(&self) -> Result<WalletHandle, WalletError> {
        if self.identity.user().is_none() {
            return Err(WalletError::NotAuthenticated);
        }
        if self.state.read().signer.is_some() || !self.identity.embedded_wallets().is_empty() {
            return Err(WalletError::AlreadyExists);
        }

        self.state.write().status = SlotStatus::Connecting;

        match self.identity.create_embedded_wallet().await {
            Ok(wallet) => {
                let handle = self.attach(wallet);
                info!(address = %handle.address, "Embedded wallet created");
                Ok(handle)
            }
            Err(e) => {
                self.state.write().status = SlotStatus::Disconnected;
                Err(e)
            }
        }
    }

    fn signer_for(&self, message_signing: bool) -> Result<Arc<dyn EmbeddedWallet>, WalletError> {
        let state = self.state.read();
        let signer = state.signer.clone().ok_or(WalletError::NoActiveWallet)?;
        let capability = state.capability.ok_or(WalletError::NoActiveWallet)?;

        if message_signing && !capability.can_sign_message {
            return Err(WalletError::UnsupportedOperation("message signing"));
        }
        if !message_signing && !capability.can_sign_transaction {
            return Err(WalletError::UnsupportedOperation("transaction signing"));
        }
        Ok(signer)
    }

    /// Sign a UTF-8 message; the signature is returned base64 encoded.
    pub async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        let signer = self.signer_for(true)?;
        let signature = signer.sign_message(message.as_bytes()).await?;
        Ok(lib_utils::b64_encode(signature))
    }

    pub async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, WalletError> {
        let signer = self.signer_for(false)?;
        signer.sign_transaction(transaction).await
    }

    /// Optimistically restore a persisted address. No signer is attached
    /// until the identity provider hands one over.
    pub fn restore(&self, address: &str) {
        let mut state = self.state.write();
        if state.handle.is_none() {
            state.handle = Some(WalletHandle::new(WalletKind::Embedded, address));
            state.status = SlotStatus::Connected;
        }
    }

    pub fn clear(&self) {
        *self.state.write() = EmbeddedState::default();
    }
}

/// [`EmbeddedWallet`] backed by an in-process keypair.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn generate() -> Self {
        Self::new(Keypair::new())
    }
}

#[async_trait]
impl EmbeddedWallet for KeypairWallet {
    fn address(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    fn supports_message_signing(&self) -> bool {
        true
    }

    fn supports_transaction_signing(&self) -> bool {
        true
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError> {
        Ok(self.keypair.sign_message(message).as_ref().to_vec())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> Result<Transaction, WalletError> {
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| WalletError::ConnectionError(format!("Signing failed: {}", e)))?;
        Ok(transaction)
    }
}
