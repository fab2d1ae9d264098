//! # Transaction History
//!
//! Signature list for an address, enriched with per-transaction details.

use futures::future::join_all;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::rpc::{ChainRpc, RpcResult};
use crate::types::TransactionRecord;

/// Fetch at most `limit` records for `address`, newest first.
///
/// Detail lookups run concurrently. A record whose detail lookup fails is
/// kept with the data from the signature list alone; only a failure of the
/// signature list itself is returned as an error.
pub async fn fetch_transaction_history(
    rpc: &dyn ChainRpc,
    address: &Pubkey,
    limit: usize,
) -> RpcResult<Vec<TransactionRecord>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let records = rpc.get_signatures_for_address(address, limit).await?;

    let mut records = join_all(records.into_iter().map(|record| enrich(rpc, record))).await;

    records.sort_by(|a, b| b.slot.cmp(&a.slot));
    records.truncate(limit);

    debug!(address = %address, count = records.len(), "Assembled transaction history");
    Ok(records)
}

async fn enrich(rpc: &dyn ChainRpc, mut record: TransactionRecord) -> TransactionRecord {
    let signature = match Signature::from_str(&record.signature) {
        Ok(sig) => sig,
        Err(e) => {
            warn!(signature = %record.signature, "Unparseable signature: {}", e);
            return record;
        }
    };

    match rpc.get_transaction(&signature).await {
        Ok(detail) => {
            record.fee = detail.fee;
            if record.block_time.is_none() {
                record.block_time = detail.block_time;
            }
        }
        Err(e) => warn!(signature = %record.signature, "Error fetching transaction: {}", e),
    }
    record
}
