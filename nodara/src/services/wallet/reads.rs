//! Balance and history reads shared by both wallet paths. Failures degrade to
//! zero or an empty list.

use lib_solana::{fetch_transaction_history, lamports_to_sol, ChainRpc, TransactionRecord};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use tracing::warn;

pub(crate) async fn balance_sol(rpc: &dyn ChainRpc, address: &str) -> f64 {
    let pubkey = match Pubkey::from_str(address) {
        Ok(pubkey) => pubkey,
        Err(e) => {
            warn!(address, "Invalid wallet address: {}", e);
            return 0.0;
        }
    };

    match rpc.get_balance(&pubkey).await {
        Ok(lamports) => lamports_to_sol(lamports),
        Err(e) => {
            warn!(address, "Error getting balance: {}", e);
            0.0
        }
    }
}

pub(crate) async fn history(
    rpc: &dyn ChainRpc,
    address: &str,
    limit: usize,
) -> Vec<TransactionRecord> {
    let pubkey = match Pubkey::from_str(address) {
        Ok(pubkey) => pubkey,
        Err(e) => {
            warn!(address, "Invalid wallet address: {}", e);
            return Vec::new();
        }
    };

    fetch_transaction_history(rpc, &pubkey, limit)
        .await
        .unwrap_or_else(|e| {
            warn!(address, "Error getting transaction history: {}", e);
            Vec::new()
        })
}
