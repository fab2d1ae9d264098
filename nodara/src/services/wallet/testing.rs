//! Test doubles for the wallet seams.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lib_solana::{ChainRpc, RpcError, RpcResult, TransactionDetail, TransactionRecord};

use super::error::WalletError;
use crate::core::service::{EmbeddedWallet, ExternalSigner, IdentityProvider, IdentityUser};

fn fake_signature(message: &[u8]) -> Vec<u8> {
    let mut signature = b"sig:".to_vec();
    signature.extend_from_slice(message);
    signature
}

// ========== Chain ==========

#[derive(Default)]
pub struct FakeChain {
    balance: u64,
    records: Vec<TransactionRecord>,
    failing: AtomicBool,
    calls: AtomicUsize,
    sent: Mutex<Vec<Transaction>>,
    confirmed: Mutex<Vec<Signature>>,
}

impl FakeChain {
    pub fn blockhash() -> Hash {
        Hash::new_from_array([9; 32])
    }

    pub fn with_balance(lamports: u64) -> Self {
        Self {
            balance: lamports,
            ..Default::default()
        }
    }

    pub fn with_slots(slots: &[u64]) -> Self {
        let records = slots
            .iter()
            .map(|slot| TransactionRecord {
                signature: Signature::from([*slot as u8; 64]).to_string(),
                block_time: Some(1_700_000_000 + *slot as i64),
                slot: *slot,
                confirmation_status: "confirmed".to_string(),
                err: None,
                fee: None,
            })
            .collect();
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of RPC calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn last_sent(&self) -> Option<Transaction> {
        self.sent.lock().last().cloned()
    }

    pub fn confirmed(&self) -> Vec<Signature> {
        self.confirmed.lock().clone()
    }

    fn enter(&self) -> RpcResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RpcError::Request("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainRpc for FakeChain {
    async fn get_balance(&self, _address: &Pubkey) -> RpcResult<u64> {
        self.enter()?;
        Ok(self.balance)
    }

    async fn get_latest_blockhash(&self) -> RpcResult<Hash> {
        self.enter()?;
        Ok(Self::blockhash())
    }

    async fn get_signatures_for_address(
        &self,
        _address: &Pubkey,
        limit: usize,
    ) -> RpcResult<Vec<TransactionRecord>> {
        self.enter()?;
        Ok(self.records.iter().take(limit).cloned().collect())
    }

    async fn get_transaction(&self, signature: &Signature) -> RpcResult<TransactionDetail> {
        self.enter()?;
        let sig = signature.to_string();
        let record = self
            .records
            .iter()
            .find(|r| r.signature == sig)
            .ok_or_else(|| RpcError::Request("transaction not found".to_string()))?;
        Ok(TransactionDetail {
            slot: record.slot,
            block_time: record.block_time,
            fee: Some(5000),
        })
    }

    async fn send_transaction(&self, transaction: &Transaction) -> RpcResult<Signature> {
        self.enter()?;
        let mut sent = self.sent.lock();
        sent.push(transaction.clone());
        Ok(Signature::from([sent.len() as u8; 64]))
    }

    async fn confirm_transaction(&self, signature: &Signature) -> RpcResult<()> {
        self.enter()?;
        self.confirmed.lock().push(*signature);
        Ok(())
    }
}

// ========== Embedded ==========

pub struct FakeEmbeddedWallet {
    pubkey: Pubkey,
    message_signing: bool,
}

impl FakeEmbeddedWallet {
    pub fn new(seed: u8) -> Self {
        Self {
            pubkey: Pubkey::new_from_array([seed; 32]),
            message_signing: true,
        }
    }

    pub fn without_message_signing(mut self) -> Self {
        self.message_signing = false;
        self
    }

    pub fn signature_for(message: &[u8]) -> Vec<u8> {
        fake_signature(message)
    }
}

#[async_trait]
impl EmbeddedWallet for FakeEmbeddedWallet {
    fn address(&self) -> String {
        self.pubkey.to_string()
    }

    fn supports_message_signing(&self) -> bool {
        self.message_signing
    }

    fn supports_transaction_signing(&self) -> bool {
        true
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError> {
        Ok(fake_signature(message))
    }

    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, WalletError> {
        Ok(transaction)
    }
}

pub struct FakeIdentity {
    user: RwLock<Option<IdentityUser>>,
    wallets: RwLock<Vec<Arc<dyn EmbeddedWallet>>>,
    create_error: RwLock<Option<WalletError>>,
    create_delay: RwLock<Option<Duration>>,
    created: AtomicUsize,
    logouts: AtomicUsize,
    next_seed: AtomicU8,
}

impl FakeIdentity {
    pub fn signed_out() -> Self {
        Self {
            user: RwLock::new(None),
            wallets: RwLock::new(Vec::new()),
            create_error: RwLock::new(None),
            create_delay: RwLock::new(None),
            created: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
            next_seed: AtomicU8::new(100),
        }
    }

    pub fn signed_in() -> Self {
        let identity = Self::signed_out();
        *identity.user.write() = Some(IdentityUser {
            id: "did:nodara:test".to_string(),
            email: Some("tester@nodara.network".to_string()),
        });
        identity
    }

    pub fn add_wallet(&self, wallet: Arc<dyn EmbeddedWallet>) {
        self.wallets.write().push(wallet);
    }

    pub fn fail_create(&self, error: WalletError) {
        *self.create_error.write() = Some(error);
    }

    /// Make wallet creation take `delay`, so calls can overlap.
    pub fn delay_create(&self, delay: Duration) {
        *self.create_delay.write() = Some(delay);
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn user(&self) -> Option<IdentityUser> {
        self.user.read().clone()
    }

    async fn logout(&self) -> Result<(), WalletError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        *self.user.write() = None;
        self.wallets.write().clear();
        Ok(())
    }

    fn embedded_wallets(&self) -> Vec<Arc<dyn EmbeddedWallet>> {
        self.wallets.read().clone()
    }

    async fn create_embedded_wallet(&self) -> Result<Arc<dyn EmbeddedWallet>, WalletError> {
        let delay = *self.create_delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.create_error.read().clone() {
            return Err(error);
        }

        let seed = self.next_seed.fetch_add(1, Ordering::SeqCst);
        let wallet: Arc<dyn EmbeddedWallet> = Arc::new(FakeEmbeddedWallet::new(seed));
        self.wallets.write().push(wallet.clone());
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(wallet)
    }
}

// ========== External ==========

pub struct FakeSigner {
    pubkey: Pubkey,
    phantom: bool,
    session: AtomicBool,
    reject_connect: AtomicBool,
    fail_disconnect: AtomicBool,
    connect_delay: Mutex<Option<Duration>>,
    connect_calls: AtomicUsize,
}

impl FakeSigner {
    pub fn new(seed: u8) -> Self {
        Self {
            pubkey: Pubkey::new_from_array([seed; 32]),
            phantom: true,
            session: AtomicBool::new(false),
            reject_connect: AtomicBool::new(false),
            fail_disconnect: AtomicBool::new(false),
            connect_delay: Mutex::new(None),
            connect_calls: AtomicUsize::new(0),
        }
    }

    pub fn not_phantom(mut self) -> Self {
        self.phantom = false;
        self
    }

    pub fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    pub fn set_session(&self, live: bool) {
        self.session.store(live, Ordering::SeqCst);
    }

    pub fn reject_next_connect(&self) {
        self.reject_connect.store(true, Ordering::SeqCst);
    }

    pub fn fail_disconnect(&self) {
        self.fail_disconnect.store(true, Ordering::SeqCst);
    }

    /// Make `connect` take `delay`, so calls can overlap.
    pub fn delay_connect(&self, delay: Duration) {
        *self.connect_delay.lock() = Some(delay);
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn signature_for(message: &[u8]) -> Vec<u8> {
        fake_signature(message)
    }
}

#[async_trait]
impl ExternalSigner for FakeSigner {
    fn is_phantom(&self) -> bool {
        self.phantom
    }

    fn public_key(&self) -> Option<Pubkey> {
        self.session.load(Ordering::SeqCst).then_some(self.pubkey)
    }

    fn is_connected(&self) -> bool {
        self.session.load(Ordering::SeqCst)
    }

    async fn connect(&self) -> Result<Pubkey, WalletError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.connect_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject_connect.swap(false, Ordering::SeqCst) {
            return Err(WalletError::UserRejected);
        }
        self.session.store(true, Ordering::SeqCst);
        Ok(self.pubkey)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        if self.fail_disconnect.load(Ordering::SeqCst) {
            return Err(WalletError::ConnectionError("signer unavailable".to_string()));
        }
        self.session.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, WalletError> {
        Ok(transaction)
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError> {
        Ok(fake_signature(message))
    }
}
