//! # Wallet Context
//!
//! UI-facing surface over the [`WalletOrchestrator`]. Actions never return
//! errors here: failures were already reported to the user through the
//! event channel, so callers only learn whether something happened.

use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::sync::Arc;
use tokio::sync::watch;

use lib_solana::TransactionRecord;

use crate::services::wallet::{
    ConnectOutcome, WalletHandle, WalletKind, WalletOrchestrator, WalletSnapshot,
};

/// A wallet option the user can pick in a selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletOption {
    pub kind: WalletKind,
    pub name: &'static str,
    /// Whether picking it can work right now.
    pub available: bool,
    /// Whether it already holds a connected wallet.
    pub connected: bool,
}

/// Cheap to clone; every clone talks to the same orchestrator.
#[derive(Clone)]
pub struct WalletContext {
    orchestrator: Arc<WalletOrchestrator>,
}

impl WalletContext {
    pub fn new(orchestrator: Arc<WalletOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &Arc<WalletOrchestrator> {
        &self.orchestrator
    }

    // ========== State ==========

    pub fn snapshot(&self) -> WalletSnapshot {
        self.orchestrator.snapshot()
    }

    /// Receiver that sees every state change after this call.
    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.orchestrator.subscribe()
    }

    pub fn is_connected(&self) -> bool {
        self.snapshot().is_connected()
    }

    pub fn wallet_address(&self) -> Option<String> {
        self.orchestrator.wallet_address()
    }

    /// Embedded first, then external; the embedded option is only
    /// available to a signed-in user.
    pub fn available_wallets(&self) -> Vec<WalletOption> {
        let snapshot = self.snapshot();
        vec![
            WalletOption {
                kind: WalletKind::Embedded,
                name: WalletKind::Embedded.provider_name(),
                available: snapshot.authenticated,
                connected: snapshot.embedded_wallet.is_some(),
            },
            WalletOption {
                kind: WalletKind::External,
                name: WalletKind::External.provider_name(),
                available: snapshot.is_phantom_available,
                connected: snapshot.external_wallet.is_some(),
            },
        ]
    }

    // ========== Actions ==========

    pub fn select_wallet_type(&self, kind: WalletKind) {
        self.orchestrator.select_wallet_type(kind);
    }

    pub fn check_phantom_availability(&self) -> bool {
        self.orchestrator.check_phantom_availability()
    }

    /// New embedded wallet, or `None` when creation did not happen.
    pub async fn create_embedded_wallet(&self) -> Option<WalletHandle> {
        match self.orchestrator.create_embedded_wallet().await {
            Ok(ConnectOutcome::Connected(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Connected external wallet, or `None` when the user was prompted to
    /// install it, a connect was already running, or the connect failed.
    pub async fn connect_external_wallet(&self) -> Option<WalletHandle> {
        match self.orchestrator.connect_external_solana_wallet().await {
            Ok(ConnectOutcome::Connected(handle)) => Some(handle),
            _ => None,
        }
    }

    pub async fn disconnect_external_wallet(&self) -> bool {
        self.orchestrator.disconnect_external_wallet().await.is_ok()
    }

    pub async fn sign_out(&self) -> bool {
        self.orchestrator.sign_out().await.is_ok()
    }

    pub async fn sign_message(&self, message: &str) -> Option<String> {
        self.orchestrator.sign_message(message).await.ok()
    }

    pub async fn sign_and_send_transaction(&self, transaction: Transaction) -> Option<Signature> {
        self.orchestrator
            .sign_and_send_transaction(transaction)
            .await
            .ok()
    }

    // ========== Reads ==========

    pub async fn get_balance(&self) -> f64 {
        self.orchestrator.get_balance().await
    }

    pub async fn get_transaction_history(&self, limit: usize) -> Vec<TransactionRecord> {
        self.orchestrator.get_transaction_history(limit).await
    }

    pub async fn mount(&self) {
        self.orchestrator.mount().await;
    }
}
