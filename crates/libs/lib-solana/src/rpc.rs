//! # RPC Seam
//!
//! The calls the wallet layer makes against the cluster. `SolanaClient`
//! implements this for real traffic; tests substitute in-memory fakes.

use async_trait::async_trait;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use thiserror::Error;

use crate::types::{TransactionDetail, TransactionRecord};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("RPC request failed: {0}")]
    Request(String),

    #[error("Transaction {0} was not confirmed")]
    NotConfirmed(String),
}

pub type RpcResult<T> = Result<T, RpcError>;

/// Blockchain calls consumed by the wallet providers and the orchestrator.
///
/// Implementations are stateless request/response clients; one instance is
/// shared behind an `Arc` for the lifetime of the app.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Balance in lamports.
    async fn get_balance(&self, address: &Pubkey) -> RpcResult<u64>;

    async fn get_latest_blockhash(&self) -> RpcResult<Hash>;

    /// Most recent signatures for `address`, newest first, at most `limit`.
    async fn get_signatures_for_address(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> RpcResult<Vec<TransactionRecord>>;

    async fn get_transaction(&self, signature: &Signature) -> RpcResult<TransactionDetail>;

    /// Submit a signed transaction without waiting for confirmation.
    async fn send_transaction(&self, transaction: &Transaction) -> RpcResult<Signature>;

    /// Wait until `signature` reaches the client's commitment level.
    async fn confirm_transaction(&self, signature: &Signature) -> RpcResult<()>;
}
