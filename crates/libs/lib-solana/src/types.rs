//! # Chain Types
//!
//! Plain data returned by [`crate::rpc::ChainRpc`]. These carry no RPC client
//! types so the wallet layer and its tests never depend on `solana-client`.

use serde::{Deserialize, Serialize};

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert lamports to the SOL display unit.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// One entry of an address's transaction history.
///
/// Built from a signature-status entry; `fee` is filled in only when the full
/// transaction could be fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub signature: String,
    /// Unix seconds; `None` when the cluster has not reported a block time.
    pub block_time: Option<i64>,
    pub slot: u64,
    /// `processed`, `confirmed` or `finalized`; empty when unknown.
    pub confirmation_status: String,
    /// Transaction error rendered as text; `None` for a successful transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
}

impl TransactionRecord {
    pub fn succeeded(&self) -> bool {
        self.err.is_none()
    }

    /// Status label for display.
    pub fn status_label(&self) -> &'static str {
        if self.succeeded() {
            "Success"
        } else {
            "Failed"
        }
    }
}

/// Details of a single fetched transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionDetail {
    pub slot: u64,
    pub block_time: Option<i64>,
    pub fee: Option<u64>,
}
