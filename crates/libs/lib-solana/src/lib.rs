//! # Solana Library
//!
//! Blockchain access for the Nodara wallet layer: one RPC connection shared by
//! every wallet provider, plus the read helpers built on top of it.
//!
//! - [`client`]: `SolanaClient`, the production RPC connection (commitment `confirmed`)
//! - [`rpc`]: `ChainRpc` trait the wallet layer depends on, and `RpcError`
//! - [`types`]: `TransactionRecord`, lamport conversion
//! - [`history`]: newest-first transaction history assembly

pub mod client;
pub mod history;
pub mod rpc;
pub mod types;

pub use client::{Network, SolanaClient, SolanaClientBuilder};
pub use history::fetch_transaction_history;
pub use rpc::{ChainRpc, RpcError, RpcResult};
pub use types::{lamports_to_sol, TransactionDetail, TransactionRecord, LAMPORTS_PER_SOL};
