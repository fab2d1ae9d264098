//! # External Wallet Provider
//!
//! Phantom-style signer discovered through the signer namespace. Balance and
//! history reads go through the shared RPC connection and never fail: any
//! error degrades to `0` or an empty list.

use parking_lot::RwLock;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::sync::Arc;
use tracing::{debug, info, warn};

use lib_solana::{ChainRpc, TransactionRecord};

use super::error::WalletError;
use super::reads;
use super::types::{ConnectOutcome, SlotStatus, WalletHandle, WalletKind};
use crate::core::service::{EnvironmentProbe, ExternalSigner, SignerNamespace};

/// Primary namespace location.
pub const PHANTOM_NAMESPACE: &str = "phantom.solana";
/// Legacy location, accepted only when the signer reports `is_phantom`.
pub const LEGACY_NAMESPACE: &str = "solana";

/// [`EnvironmentProbe`] that looks the signer up in a [`SignerNamespace`].
pub struct NamespaceProbe {
    namespace: Arc<dyn SignerNamespace>,
}

impl NamespaceProbe {
    pub fn new(namespace: Arc<dyn SignerNamespace>) -> Self {
        Self { namespace }
    }
}

impl EnvironmentProbe for NamespaceProbe {
    fn discover(&self) -> Option<Arc<dyn ExternalSigner>> {
        self.namespace.lookup(PHANTOM_NAMESPACE).or_else(|| {
            self.namespace
                .lookup(LEGACY_NAMESPACE)
                .filter(|signer| signer.is_phantom())
        })
    }
}

#[derive(Default)]
struct ExternalState {
    signer: Option<Arc<dyn ExternalSigner>>,
    handle: Option<WalletHandle>,
    status: SlotStatus,
    available: bool,
}

pub struct ExternalProvider {
    probe: Arc<dyn EnvironmentProbe>,
    rpc: Arc<dyn ChainRpc>,
    state: RwLock<ExternalState>,
}

impl ExternalProvider {
    pub fn new(probe: Arc<dyn EnvironmentProbe>, rpc: Arc<dyn ChainRpc>) -> Self {
        Self {
            probe,
            rpc,
            state: RwLock::new(ExternalState::default()),
        }
    }

    pub fn handle(&self) -> Option<WalletHandle> {
        self.state.read().handle.clone()
    }

    pub fn status(&self) -> SlotStatus {
        self.state.read().status
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().status.is_connected()
    }

    /// Result of the last availability check.
    pub fn is_available(&self) -> bool {
        self.state.read().available
    }

    /// Probe the environment for a compatible signer.
    pub fn check_availability(&self) -> bool {
        let available = self.probe.discover().is_some();
        self.state.write().available = available;
        available
    }

    /// Connect to the signer.
    ///
    /// An absent signer is not an error: the caller gets
    /// [`ConnectOutcome::InstallPrompted`] and nothing changes. A signer error
    /// puts the slot back where it was.
    pub async fn connect(&self) -> Result<ConnectOutcome, WalletError> {
        let Some(signer) = self.probe.discover() else {
            self.state.write().available = false;
            info!("External wallet not installed");
            return Ok(ConnectOutcome::InstallPrompted);
        };

        let previous = {
            let mut state = self.state.write();
            state.available = true;
            std::mem::replace(&mut state.status, SlotStatus::Connecting)
        };

        match signer.connect().await {
            Ok(pubkey) => {
                let handle = WalletHandle::new(WalletKind::External, pubkey.to_string());
                let mut state = self.state.write();
                state.signer = Some(signer);
                state.handle = Some(handle.clone());
                state.status = SlotStatus::Connected;
                info!(address = %handle.address, "External wallet connected");
                Ok(ConnectOutcome::Connected(handle))
            }
            Err(e) => {
                self.state.write().status = previous;
                warn!("External wallet connect failed: {}", e);
                Err(e)
            }
        }
    }

    /// Disconnect the signer. Calling it without a session is a no-op.
    pub async fn disconnect(&self) -> Result<(), WalletError> {
        let signer = self.state.read().signer.clone();
        if let Some(signer) = signer {
            signer.disconnect().await?;
        }
        self.clear();
        debug!("External wallet disconnected");
        Ok(())
    }

    /// Reconnect once if the signer still holds a session. Failures are
    /// logged and otherwise ignored.
    pub async fn auto_reconnect(&self) -> Option<WalletHandle> {
        if !self.check_availability() {
            return None;
        }
        let signer = self.probe.discover()?;
        if !signer.is_connected() {
            return None;
        }

        match self.connect().await {
            Ok(ConnectOutcome::Connected(handle)) => Some(handle),
            Ok(_) => None,
            Err(e) => {
                warn!("Auto-connect failed: {}", e);
                None
            }
        }
    }

    fn signer(&self) -> Result<Arc<dyn ExternalSigner>, WalletError> {
        let state = self.state.read();
        match (&state.signer, &state.handle) {
            (Some(signer), _) => Ok(signer.clone()),
            (None, Some(_)) => Err(WalletError::ConnectionError(
                "External wallet session has not been re-established".to_string(),
            )),
            (None, None) => Err(WalletError::NoActiveWallet),
        }
    }

    /// Sign a UTF-8 message; the signature is returned hex encoded.
    pub async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        let signer = self.signer()?;
        let signature = signer.sign_message(message.as_bytes()).await?;
        Ok(hex::encode(signature))
    }

    pub async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, WalletError> {
        self.signer()?.sign_transaction(transaction).await
    }

    /// Sign, broadcast and wait for `confirmed`.
    pub async fn sign_and_send_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Signature, WalletError> {
        let signed = self.sign_transaction(transaction).await?;
        let signature = self.rpc.send_transaction(&signed).await?;
        self.rpc.confirm_transaction(&signature).await?;
        info!(signature = %signature, "Transaction confirmed");
        Ok(signature)
    }

    /// SOL balance of the connected wallet, `0.0` on any failure.
    pub async fn get_balance(&self) -> f64 {
        match self.handle() {
            Some(handle) => reads::balance_sol(self.rpc.as_ref(), &handle.address).await,
            None => 0.0,
        }
    }

    pub async fn get_transaction_history(&self, limit: usize) -> Vec<TransactionRecord> {
        match self.handle() {
            Some(handle) => reads::history(self.rpc.as_ref(), &handle.address, limit).await,
            None => Vec::new(),
        }
    }

    /// Optimistically restore a persisted address without contacting the
    /// signer. A signer whose live session holds the same key is attached,
    /// so it can sign without a new connect.
    pub fn restore(&self, address: &str) {
        let live = self
            .probe
            .discover()
            .filter(|signer| {
                signer.public_key().map(|key| key.to_string()).as_deref() == Some(address)
            });

        let mut state = self.state.write();
        if state.handle.is_none() {
            state.handle = Some(WalletHandle::new(WalletKind::External, address));
            state.status = SlotStatus::Connected;
        }
        if state.signer.is_none() && live.is_some() {
            debug!(address, "Attached live signer to restored session");
            state.signer = live;
        }
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        state.signer = None;
        state.handle = None;
        state.status = SlotStatus::Disconnected;
    }
}
