//! # Solana RPC Client
//!
//! Wrapper around the nonblocking `solana_client` RPC client. One instance is
//! built at startup and shared read-only by both wallet providers.
//!
//! Every request uses commitment `confirmed`.
//!
//! ## RPC Endpoints
//!
//! - **Mainnet**: `https://api.mainnet-beta.solana.com` (default)
//! - **Devnet**: `https://api.devnet.solana.com`
//! - Any other endpoint through [`SolanaClientBuilder::rpc_url`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_solana::{ChainRpc, SolanaClient};
//! use solana_sdk::pubkey::Pubkey;
//! use std::str::FromStr;
//!
//! # async fn example() -> lib_solana::RpcResult<()> {
//! let client = SolanaClient::builder().build();
//! let owner = Pubkey::from_str("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL").unwrap();
//! let lamports = client.get_balance(&owner).await?;
//! println!("{} SOL", lib_solana::lamports_to_sol(lamports));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_client::rpc_response::RpcConfirmedTransactionStatusWithSignature;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::sync::Arc;
use tracing::{debug, info};

use crate::rpc::{ChainRpc, RpcError, RpcResult};
use crate::types::{TransactionDetail, TransactionRecord};

pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Solana cluster selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Solana mainnet-beta
    Mainnet,
    /// Solana devnet
    Devnet,
}

impl Network {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_RPC_URL,
            Network::Devnet => DEVNET_RPC_URL,
        }
    }
}

/// Shared RPC connection.
pub struct SolanaClient {
    rpc: Arc<RpcClient>,
    url: String,
}

/// Builder for configuring SolanaClient.
#[derive(Debug, Clone)]
pub struct SolanaClientBuilder {
    network: Network,
    custom_rpc_url: Option<String>,
}

impl Default for SolanaClientBuilder {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            custom_rpc_url: None,
        }
    }
}

impl SolanaClientBuilder {
    /// Set the Solana network.
    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Set a custom RPC URL (overrides the network URL).
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.custom_rpc_url = Some(url.into());
        self
    }

    /// Resolved endpoint for the current settings.
    pub fn resolved_url(&self) -> String {
        self.custom_rpc_url
            .clone()
            .unwrap_or_else(|| self.network.rpc_url().to_string())
    }

    /// Build the client. No request is made until the first call.
    pub fn build(self) -> SolanaClient {
        let url = self.resolved_url();
        info!("Connecting to Solana RPC: {}", url);
        let rpc = RpcClient::new_with_commitment(url.clone(), CommitmentConfig::confirmed());
        SolanaClient {
            rpc: Arc::new(rpc),
            url,
        }
    }
}

impl SolanaClient {
    pub fn builder() -> SolanaClientBuilder {
        SolanaClientBuilder::default()
    }

    /// Client for an explicit endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self::builder().rpc_url(url).build()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn commitment(&self) -> CommitmentConfig {
        self.rpc.commitment()
    }
}

fn record_from_status(status: RpcConfirmedTransactionStatusWithSignature) -> TransactionRecord {
    TransactionRecord {
        signature: status.signature,
        block_time: status.block_time,
        slot: status.slot,
        confirmation_status: status
            .confirmation_status
            .map(|s| format!("{:?}", s).to_lowercase())
            .unwrap_or_default(),
        err: status.err.map(|e| format!("{:?}", e)),
        fee: None,
    }
}

#[async_trait]
impl ChainRpc for SolanaClient {
    async fn get_balance(&self, address: &Pubkey) -> RpcResult<u64> {
        self.rpc
            .get_balance(address)
            .await
            .map_err(|e| RpcError::Request(format!("Failed to get balance: {}", e)))
    }

    async fn get_latest_blockhash(&self) -> RpcResult<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| RpcError::Request(format!("Failed to get latest blockhash: {}", e)))
    }

    async fn get_signatures_for_address(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> RpcResult<Vec<TransactionRecord>> {
        let config = GetConfirmedSignaturesForAddress2Config {
            limit: Some(limit),
            commitment: Some(self.commitment()),
            ..Default::default()
        };
        let statuses = self
            .rpc
            .get_signatures_for_address_with_config(address, config)
            .await
            .map_err(|e| RpcError::Request(format!("Failed to get signatures: {}", e)))?;

        debug!(address = %address, count = statuses.len(), "Fetched signatures");
        Ok(statuses.into_iter().map(record_from_status).collect())
    }

    async fn get_transaction(&self, signature: &Signature) -> RpcResult<TransactionDetail> {
        let config = RpcTransactionConfig {
            commitment: Some(self.commitment()),
            max_supported_transaction_version: Some(0),
            ..Default::default()
        };
        let tx = self
            .rpc
            .get_transaction_with_config(signature, config)
            .await
            .map_err(|e| RpcError::Request(format!("Failed to get transaction: {}", e)))?;

        Ok(TransactionDetail {
            slot: tx.slot,
            block_time: tx.block_time,
            fee: tx.transaction.meta.map(|meta| meta.fee),
        })
    }

    async fn send_transaction(&self, transaction: &Transaction) -> RpcResult<Signature> {
        self.rpc
            .send_transaction(transaction)
            .await
            .map_err(|e| RpcError::Request(format!("Failed to send transaction: {}", e)))
    }

    async fn confirm_transaction(&self, signature: &Signature) -> RpcResult<()> {
        self.rpc
            .poll_for_signature_with_commitment(signature, self.commitment())
            .await
            .map_err(|e| {
                debug!(signature = %signature, "Confirmation failed: {}", e);
                RpcError::NotConfirmed(signature.to_string())
            })
    }
}
