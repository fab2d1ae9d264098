//! # Wallet Orchestrator
//!
//! Unifies the embedded and external providers behind one selection.
//!
//! ## State
//!
//! - Each provider owns its own [`WalletHandle`]; the orchestrator only reads it
//! - `selected` names the active provider; `active_wallet` and
//!   `wallet_address` are derived from it on every read
//! - `connecting` guards both connect paths and the startup auto-reconnect; a
//!   second attempt while one is in flight returns [`ConnectOutcome::Busy`]
//!
//! Every mutation publishes a fresh [`WalletSnapshot`] on a watch channel.
//!
//! ## Persistence
//!
//! `selectedWallet` and `walletAddress` are written on a successful connect,
//! removed on disconnect, and read once by [`WalletOrchestrator::mount`]. The
//! restored handle is trusted without any network call.

use parking_lot::RwLock;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use lib_solana::{ChainRpc, TransactionRecord};

use super::embedded::EmbeddedProvider;
use super::error::WalletError;
use super::external::ExternalProvider;
use super::reads;
use super::types::{ConnectOutcome, WalletHandle, WalletKind, WalletSnapshot};
use crate::app::events::Notifier;
use crate::core::service::{EnvironmentProbe, IdentityProvider, KeyValueStore};

pub const SELECTED_WALLET_KEY: &str = "selectedWallet";
pub const WALLET_ADDRESS_KEY: &str = "walletAddress";

/// External collaborators of the wallet layer.
#[derive(Clone)]
pub struct WalletDeps {
    pub identity: Arc<dyn IdentityProvider>,
    pub probe: Arc<dyn EnvironmentProbe>,
    pub rpc: Arc<dyn ChainRpc>,
    pub store: Arc<dyn KeyValueStore>,
}

/// Holds the connect flag until dropped.
struct ConnectGuard<'a>(&'a AtomicBool);

impl<'a> ConnectGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ConnectGuard(flag))
    }
}

impl Drop for ConnectGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct WalletOrchestrator {
    identity: Arc<dyn IdentityProvider>,
    rpc: Arc<dyn ChainRpc>,
    store: Arc<dyn KeyValueStore>,
    embedded: EmbeddedProvider,
    external: ExternalProvider,
    notifier: Notifier,
    install_url: String,
    selected: RwLock<Option<WalletKind>>,
    connecting: AtomicBool,
    snapshot_tx: watch::Sender<WalletSnapshot>,
}

impl WalletOrchestrator {
    pub fn new(deps: WalletDeps, notifier: Notifier, install_url: impl Into<String>) -> Self {
        let (snapshot_tx, _) = watch::channel(WalletSnapshot::default());
        let orchestrator = Self {
            embedded: EmbeddedProvider::new(deps.identity.clone()),
            external: ExternalProvider::new(deps.probe, deps.rpc.clone()),
            identity: deps.identity,
            rpc: deps.rpc,
            store: deps.store,
            notifier,
            install_url: install_url.into(),
            selected: RwLock::new(None),
            connecting: AtomicBool::new(false),
            snapshot_tx,
        };
        orchestrator.publish();
        orchestrator
    }

    // ========== Reads ==========

    pub fn snapshot(&self) -> WalletSnapshot {
        let selected = *self.selected.read();
        let embedded = self.embedded.handle();
        let external = self.external.handle();
        let active = match selected {
            Some(WalletKind::Embedded) => embedded.clone(),
            Some(WalletKind::External) => external.clone(),
            None => None,
        };

        WalletSnapshot {
            authenticated: self.identity.user().is_some(),
            is_connecting: self.connecting.load(Ordering::Acquire),
            selected_wallet_type: selected,
            wallet_address: active.as_ref().map(|w| w.address.clone()),
            active_wallet: active,
            embedded_wallet: embedded,
            external_wallet: external,
            is_phantom_available: self.external.is_available(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn selected_wallet_type(&self) -> Option<WalletKind> {
        *self.selected.read()
    }

    pub fn active_wallet(&self) -> Option<WalletHandle> {
        self.snapshot().active_wallet
    }

    pub fn wallet_address(&self) -> Option<String> {
        self.snapshot().wallet_address
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::Acquire)
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }

    /// Make `kind` the active provider without connecting anything.
    pub fn select_wallet_type(&self, kind: WalletKind) {
        *self.selected.write() = Some(kind);
        self.publish();
    }

    pub fn check_phantom_availability(&self) -> bool {
        let available = self.external.check_availability();
        self.publish();
        available
    }

    // ========== Connect ==========

    #[instrument(skip(self))]
    pub async fn create_embedded_wallet(&self) -> Result<ConnectOutcome, WalletError> {
        let Some(guard) = ConnectGuard::try_acquire(&self.connecting) else {
            debug!("Connect already in progress");
            return Ok(ConnectOutcome::Busy);
        };
        self.publish();

        let result = self.embedded.create().await;
        drop(guard);

        let outcome = match result {
            Ok(handle) => {
                *self.selected.write() = Some(WalletKind::Embedded);
                self.persist(WalletKind::Embedded, &handle.address).await;
                self.notifier.success("Success", "Embedded Solana wallet created!");
                Ok(ConnectOutcome::Connected(handle))
            }
            Err(e @ (WalletError::NotAuthenticated | WalletError::AlreadyExists)) => {
                debug!("Embedded wallet not created: {}", e);
                Err(e)
            }
            Err(e) => {
                warn!("Error creating wallet: {}", e);
                self.notifier.error("Error", "Failed to create wallet. Please try again.");
                Err(e)
            }
        };
        self.publish();
        outcome
    }

    #[instrument(skip(self))]
    pub async fn connect_external_solana_wallet(&self) -> Result<ConnectOutcome, WalletError> {
        if self.identity.user().is_none() {
            return Err(WalletError::NotAuthenticated);
        }
        let Some(guard) = ConnectGuard::try_acquire(&self.connecting) else {
            debug!("Connect already in progress");
            return Ok(ConnectOutcome::Busy);
        };
        self.publish();

        let result = self.external.connect().await;
        drop(guard);

        match &result {
            Ok(ConnectOutcome::Connected(handle)) => {
                *self.selected.write() = Some(WalletKind::External);
                self.persist(WalletKind::External, &handle.address).await;
                self.notifier.success("Success", "Phantom wallet connected successfully!");
            }
            Ok(ConnectOutcome::InstallPrompted) => {
                self.notifier.install_prompt("Phantom", &self.install_url);
            }
            Ok(ConnectOutcome::Busy) => {}
            Err(_) => {
                self.notifier.error(
                    "Connection Failed",
                    "Failed to connect to Phantom wallet. Please try again.",
                );
            }
        }
        self.publish();
        result
    }

    #[instrument(skip(self))]
    pub async fn disconnect_external_wallet(&self) -> Result<(), WalletError> {
        let had_session = self.external.handle().is_some();

        if let Err(e) = self.external.disconnect().await {
            warn!("Failed to disconnect wallet: {}", e);
            self.notifier.error("Error", "Failed to disconnect wallet");
            self.publish();
            return Err(e);
        }

        if self.selected_wallet_type() == Some(WalletKind::External) {
            *self.selected.write() = None;
            self.forget_selection().await;
        }
        if had_session {
            self.notifier.success("Disconnected", "Wallet disconnected successfully");
        }
        self.publish();
        Ok(())
    }

    /// Log out of the identity provider and drop every wallet session.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), WalletError> {
        if let Err(e) = self.identity.logout().await {
            warn!("Error disconnecting wallet: {}", e);
            self.notifier.error("Error", "Failed to disconnect wallet");
            return Err(e);
        }

        self.embedded.clear();
        if let Err(e) = self.external.disconnect().await {
            warn!("External wallet did not disconnect cleanly: {}", e);
            self.external.clear();
        }
        *self.selected.write() = None;
        self.forget_selection().await;

        info!("Signed out");
        self.notifier.success("Success", "Wallet disconnected");
        self.publish();
        Ok(())
    }

    // ========== Signing ==========

    /// Sign a UTF-8 message with the active wallet.
    ///
    /// Embedded signatures are base64, external signatures hex.
    #[instrument(skip(self, message))]
    pub async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        let Some(active) = self.active_wallet() else {
            self.notifier.error("Error", "No wallet available");
            return Err(WalletError::NoActiveWallet);
        };

        let result = match active.kind {
            WalletKind::External => self.external.sign_message(message).await,
            WalletKind::Embedded => self.embedded.sign_message(message).await,
        };

        if let Err(e) = &result {
            warn!("Error signing message: {}", e);
            self.notifier.error("Error", "Failed to sign message");
        }
        result
    }

    /// Sign, broadcast and confirm `transaction` with the active wallet.
    ///
    /// A transaction without a recent blockhash gets the latest one.
    #[instrument(skip(self, transaction))]
    pub async fn sign_and_send_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Signature, WalletError> {
        let Some(active) = self.active_wallet() else {
            self.notifier.error("Error", "No wallet or connection available");
            return Err(WalletError::NoActiveWallet);
        };

        let result = self.send_with(active.kind, transaction).await;
        match &result {
            Ok(signature) => info!(signature = %signature, "Transaction sent"),
            Err(e) => {
                warn!("Error sending transaction: {}", e);
                self.notifier.error("Error", "Failed to send transaction");
            }
        }
        result
    }

    async fn send_with(
        &self,
        kind: WalletKind,
        mut transaction: Transaction,
    ) -> Result<Signature, WalletError> {
        if transaction.message.recent_blockhash == Hash::default() {
            transaction.message.recent_blockhash = self.rpc.get_latest_blockhash().await?;
        }

        match kind {
            WalletKind::External => self.external.sign_and_send_transaction(transaction).await,
            WalletKind::Embedded => {
                let signed = self.embedded.sign_transaction(transaction).await?;
                let signature = self.rpc.send_transaction(&signed).await?;
                self.rpc.confirm_transaction(&signature).await?;
                Ok(signature)
            }
        }
    }

    // ========== Chain Reads ==========

    /// SOL balance of the active wallet; `0.0` when there is none or the RPC
    /// call fails.
    pub async fn get_balance(&self) -> f64 {
        match self.selected_wallet_type() {
            Some(WalletKind::External) => self.external.get_balance().await,
            Some(WalletKind::Embedded) => match self.embedded.handle() {
                Some(handle) => reads::balance_sol(self.rpc.as_ref(), &handle.address).await,
                None => 0.0,
            },
            None => 0.0,
        }
    }

    /// At most `limit` records for the active wallet, newest first.
    pub async fn get_transaction_history(&self, limit: usize) -> Vec<TransactionRecord> {
        match self.selected_wallet_type() {
            Some(WalletKind::External) => self.external.get_transaction_history(limit).await,
            Some(WalletKind::Embedded) => match self.embedded.handle() {
                Some(handle) => reads::history(self.rpc.as_ref(), &handle.address, limit).await,
                None => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    // ========== Lifecycle ==========

    /// Startup sequence: attach any embedded wallet the identity provider
    /// holds, restore the persisted selection, then try the external
    /// auto-reconnect once.
    #[instrument(skip(self))]
    pub async fn mount(&self) {
        self.embedded.sync_from_identity();

        if self.restore_session().await.is_none() && self.embedded.handle().is_some() {
            *self.selected.write() = Some(WalletKind::Embedded);
        }

        match ConnectGuard::try_acquire(&self.connecting) {
            Some(guard) => {
                self.publish();
                let resumed = self.external.auto_reconnect().await;
                drop(guard);
                if let Some(handle) = resumed {
                    debug!(address = %handle.address, "External wallet session resumed");
                }
            }
            None => debug!("Connect already in progress, skipping auto-reconnect"),
        }
        self.publish();
    }

    /// Read the persisted selection once. Malformed values are removed and
    /// treated as no prior session.
    pub async fn restore_session(&self) -> Option<WalletKind> {
        let name = self.store.get_item(SELECTED_WALLET_KEY).await;
        let address = self.store.get_item(WALLET_ADDRESS_KEY).await;

        let (name, address) = match (name, address) {
            (Ok(Some(name)), Ok(Some(address))) => (name, address),
            (Ok(None), Ok(None)) => return None,
            (Ok(_), Ok(_)) => {
                warn!("Persisted wallet selection is incomplete, discarding it");
                self.forget_selection().await;
                return None;
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to read persisted wallet selection: {}", e);
                return None;
            }
        };

        let kind = match (name.parse::<WalletKind>(), Pubkey::from_str(&address)) {
            (Ok(kind), Ok(_)) => kind,
            _ => {
                warn!(provider = %name, "Persisted wallet selection is malformed, discarding it");
                self.forget_selection().await;
                return None;
            }
        };

        match kind {
            WalletKind::Embedded => self.embedded.restore(&address),
            WalletKind::External => self.external.restore(&address),
        }
        *self.selected.write() = Some(kind);
        info!(kind = %kind, address = %address, "Restored wallet selection");
        self.publish();
        Some(kind)
    }

    async fn persist(&self, kind: WalletKind, address: &str) {
        if let Err(e) = self.store.set_item(SELECTED_WALLET_KEY, kind.provider_name()).await {
            warn!("Failed to persist wallet selection: {}", e);
            return;
        }
        if let Err(e) = self.store.set_item(WALLET_ADDRESS_KEY, address).await {
            warn!("Failed to persist wallet address: {}", e);
        }
    }

    async fn forget_selection(&self) {
        for key in [SELECTED_WALLET_KEY, WALLET_ADDRESS_KEY] {
            if let Err(e) = self.store.remove_item(key).await {
                warn!(key, "Failed to remove persisted value: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::{AppEvent, NoticeLevel};
    use crate::core::service::ExternalSigner;
    use crate::services::storage::MemoryStore;
    use crate::services::wallet::external::{NamespaceProbe, PHANTOM_NAMESPACE};
    use crate::services::wallet::registry::SignerRegistry;
    use crate::services::wallet::testing::{FakeChain, FakeEmbeddedWallet, FakeIdentity, FakeSigner};
    use async_channel::Receiver;
    use std::time::Duration;

    const INSTALL_URL: &str = "https://phantom.app/download";

    struct Harness {
        orchestrator: WalletOrchestrator,
        identity: Arc<FakeIdentity>,
        registry: Arc<SignerRegistry>,
        chain: Arc<FakeChain>,
        store: Arc<MemoryStore>,
        events: Receiver<AppEvent>,
    }

    impl Harness {
        fn new(identity: FakeIdentity, chain: FakeChain) -> Self {
            Self::with_store(identity, chain, Arc::new(MemoryStore::default()))
        }

        fn with_store(identity: FakeIdentity, chain: FakeChain, store: Arc<MemoryStore>) -> Self {
            let identity = Arc::new(identity);
            let registry = Arc::new(SignerRegistry::default());
            let chain = Arc::new(chain);
            let (notifier, events) = Notifier::channel();
            let deps = WalletDeps {
                identity: identity.clone(),
                probe: Arc::new(NamespaceProbe::new(registry.clone())),
                rpc: chain.clone(),
                store: store.clone(),
            };
            Self {
                orchestrator: WalletOrchestrator::new(deps, notifier, INSTALL_URL),
                identity,
                registry,
                chain,
                store,
                events,
            }
        }

        fn install_signer(&self, seed: u8) -> Arc<FakeSigner> {
            let signer = Arc::new(FakeSigner::new(seed));
            self.registry.register(PHANTOM_NAMESPACE, signer.clone());
            signer
        }

        fn drain_events(&self) -> Vec<AppEvent> {
            std::iter::from_fn(|| self.events.try_recv().ok()).collect()
        }

        async fn persisted(&self) -> (Option<String>, Option<String>) {
            (
                self.store.get_item(SELECTED_WALLET_KEY).await.unwrap(),
                self.store.get_item(WALLET_ADDRESS_KEY).await.unwrap(),
            )
        }
    }

    fn error_count(events: &[AppEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, AppEvent::Notice { level: NoticeLevel::Error, .. }))
            .count()
    }

    // ========== Connect Tests ==========

    #[tokio::test]
    async fn test_external_connect_disconnect_sequence() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        let signer = h.install_signer(11);

        for _ in 0..2 {
            let outcome = h.orchestrator.connect_external_solana_wallet().await.unwrap();
            assert!(matches!(outcome, ConnectOutcome::Connected(_)));
            let snapshot = h.orchestrator.snapshot();
            assert!(snapshot.is_connected());
            assert_eq!(snapshot.selected_wallet_type, Some(WalletKind::External));
            assert_eq!(snapshot.wallet_address, Some(signer.pubkey().to_string()));
            assert_eq!(
                h.persisted().await,
                (Some("Phantom".to_string()), Some(signer.pubkey().to_string()))
            );

            h.orchestrator.disconnect_external_wallet().await.unwrap();
            let snapshot = h.orchestrator.snapshot();
            assert!(!snapshot.is_connected());
            assert_eq!(snapshot.selected_wallet_type, None);
            assert_eq!(h.persisted().await, (None, None));
        }
    }

    #[tokio::test]
    async fn test_external_connect_requires_authentication() {
        let h = Harness::new(FakeIdentity::signed_out(), FakeChain::default());
        let signer = h.install_signer(11);

        assert_eq!(
            h.orchestrator.connect_external_solana_wallet().await,
            Err(WalletError::NotAuthenticated)
        );
        assert_eq!(signer.connect_calls(), 0);
    }

    #[tokio::test]
    async fn test_external_connect_without_signer_prompts_install() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        h.orchestrator.select_wallet_type(WalletKind::Embedded);

        let outcome = h.orchestrator.connect_external_solana_wallet().await;

        assert_eq!(outcome, Ok(ConnectOutcome::InstallPrompted));
        let snapshot = h.orchestrator.snapshot();
        assert!(!snapshot.is_phantom_available);
        assert_eq!(snapshot.external_wallet, None);
        assert_eq!(snapshot.selected_wallet_type, Some(WalletKind::Embedded));
        assert!(!snapshot.is_connecting);
        assert_eq!(
            h.drain_events(),
            vec![AppEvent::InstallPrompt {
                wallet: "Phantom".to_string(),
                url: INSTALL_URL.to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_rejected_connect_notifies_once() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        let signer = h.install_signer(11);
        signer.reject_next_connect();

        let result = h.orchestrator.connect_external_solana_wallet().await;

        assert_eq!(result, Err(WalletError::UserRejected));
        assert_eq!(h.orchestrator.selected_wallet_type(), None);
        assert!(!h.orchestrator.is_connecting());
        assert_eq!(error_count(&h.drain_events()), 1);
        assert_eq!(h.persisted().await, (None, None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_creates_are_single_flight() {
        let identity = FakeIdentity::signed_in();
        identity.delay_create(Duration::from_millis(50));
        let h = Harness::new(identity, FakeChain::default());

        let (first, second) = tokio::join!(
            h.orchestrator.create_embedded_wallet(),
            h.orchestrator.create_embedded_wallet()
        );

        assert!(matches!(first, Ok(ConnectOutcome::Connected(_))));
        assert_eq!(second, Ok(ConnectOutcome::Busy));
        assert_eq!(h.identity.created(), 1);
        assert_eq!(h.store.len(), 2);
        assert_eq!(h.persisted().await.0.as_deref(), Some("Embedded"));
        assert!(!h.orchestrator.is_connecting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_blocks_overlapping_external_connect() {
        let identity = FakeIdentity::signed_in();
        identity.delay_create(Duration::from_millis(50));
        let h = Harness::new(identity, FakeChain::default());
        let signer = h.install_signer(11);

        let (created, connected) = tokio::join!(
            h.orchestrator.create_embedded_wallet(),
            h.orchestrator.connect_external_solana_wallet()
        );

        assert!(matches!(created, Ok(ConnectOutcome::Connected(_))));
        assert_eq!(connected, Ok(ConnectOutcome::Busy));
        assert_eq!(signer.connect_calls(), 0);
        assert_eq!(h.orchestrator.selected_wallet_type(), Some(WalletKind::Embedded));
        assert!(!h.orchestrator.is_connecting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_reconnect_blocks_user_connect() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        let signer = h.install_signer(11);
        signer.set_session(true);
        signer.delay_connect(Duration::from_millis(50));

        let user_connect = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let connecting = h.orchestrator.is_connecting();
            (connecting, h.orchestrator.connect_external_solana_wallet().await)
        };
        let ((), (connecting, outcome)) = tokio::join!(h.orchestrator.mount(), user_connect);

        assert!(connecting);
        assert_eq!(outcome, Ok(ConnectOutcome::Busy));
        assert_eq!(signer.connect_calls(), 1);
        assert!(h.orchestrator.snapshot().external_wallet.is_some());
        assert!(!h.orchestrator.is_connecting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_skips_auto_reconnect_while_connecting() {
        let identity = FakeIdentity::signed_in();
        identity.delay_create(Duration::from_millis(50));
        let h = Harness::new(identity, FakeChain::default());
        let signer = h.install_signer(11);
        signer.set_session(true);

        let mount = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.orchestrator.mount().await;
        };
        let (created, ()) = tokio::join!(h.orchestrator.create_embedded_wallet(), mount);

        assert!(matches!(created, Ok(ConnectOutcome::Connected(_))));
        assert_eq!(signer.connect_calls(), 0);
        assert_eq!(h.orchestrator.snapshot().external_wallet, None);
    }

    #[tokio::test]
    async fn test_create_embedded_selects_it() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        let mut updates = h.orchestrator.subscribe();

        h.orchestrator.create_embedded_wallet().await.unwrap();

        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(snapshot.selected_wallet_type, Some(WalletKind::Embedded));
        assert_eq!(
            snapshot.wallet_address,
            snapshot.embedded_wallet.as_ref().map(|w| w.address.clone())
        );
        assert!(snapshot.is_connected());
        assert!(matches!(
            h.drain_events().as_slice(),
            [AppEvent::Notice { level: NoticeLevel::Success, .. }]
        ));
    }

    // ========== Selection Tests ==========

    #[tokio::test]
    async fn test_single_active_wallet() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        let signer = h.install_signer(11);

        let embedded = match h.orchestrator.create_embedded_wallet().await.unwrap() {
            ConnectOutcome::Connected(handle) => handle,
            other => panic!("unexpected outcome: {:?}", other),
        };
        h.orchestrator.connect_external_solana_wallet().await.unwrap();

        let snapshot = h.orchestrator.snapshot();
        assert!(snapshot.embedded_wallet.is_some());
        assert!(snapshot.external_wallet.is_some());
        assert_eq!(snapshot.active_wallet.unwrap().kind, WalletKind::External);
        assert_eq!(snapshot.wallet_address, Some(signer.pubkey().to_string()));

        h.orchestrator.select_wallet_type(WalletKind::Embedded);
        assert_eq!(h.orchestrator.wallet_address(), Some(embedded.address));
    }

    // ========== Signing Tests ==========

    #[tokio::test]
    async fn test_embedded_sign_without_capability() {
        let identity = FakeIdentity::signed_in();
        identity.add_wallet(Arc::new(FakeEmbeddedWallet::new(21).without_message_signing()));
        let h = Harness::new(identity, FakeChain::default());
        h.orchestrator.mount().await;
        let before = h.orchestrator.snapshot();

        let result = h.orchestrator.sign_message("hello").await;

        assert_eq!(result, Err(WalletError::UnsupportedOperation("message signing")));
        assert_eq!(h.orchestrator.snapshot(), before);
        assert_eq!(error_count(&h.drain_events()), 1);
    }

    #[tokio::test]
    async fn test_sign_message_without_wallet() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        assert_eq!(
            h.orchestrator.sign_message("hello").await,
            Err(WalletError::NoActiveWallet)
        );
    }

    #[tokio::test]
    async fn test_embedded_sign_and_send_fills_blockhash_and_confirms() {
        let identity = FakeIdentity::signed_in();
        identity.add_wallet(Arc::new(FakeEmbeddedWallet::new(21)));
        let h = Harness::new(identity, FakeChain::default());
        h.orchestrator.mount().await;

        let payer = Pubkey::new_from_array([21; 32]);
        let tx = Transaction::new_with_payer(&[], Some(&payer));
        let signature = h.orchestrator.sign_and_send_transaction(tx).await.unwrap();

        let sent = h.chain.last_sent().unwrap();
        assert_eq!(sent.message.recent_blockhash, FakeChain::blockhash());
        assert_eq!(h.chain.confirmed(), vec![signature]);
    }

    #[tokio::test]
    async fn test_external_sign_message_is_hex() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        h.install_signer(11);
        h.orchestrator.connect_external_solana_wallet().await.unwrap();

        let signature = h.orchestrator.sign_message("nodara").await.unwrap();
        assert_eq!(signature, hex::encode(FakeSigner::signature_for(b"nodara")));
    }

    // ========== Read Tests ==========

    #[tokio::test]
    async fn test_balance_zero_without_wallet() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::with_balance(1_000_000_000));

        assert_eq!(h.orchestrator.get_balance().await, 0.0);
        assert!(h.orchestrator.get_transaction_history(10).await.is_empty());
        assert_eq!(h.chain.calls(), 0);
    }

    #[tokio::test]
    async fn test_embedded_balance_in_sol() {
        let identity = FakeIdentity::signed_in();
        identity.add_wallet(Arc::new(FakeEmbeddedWallet::new(21)));
        let h = Harness::new(identity, FakeChain::with_balance(1_500_000_000));
        h.orchestrator.mount().await;

        assert_eq!(h.orchestrator.get_balance().await, 1.5);
    }

    #[tokio::test]
    async fn test_history_bounded_newest_first() {
        let identity = FakeIdentity::signed_in();
        identity.add_wallet(Arc::new(FakeEmbeddedWallet::new(21)));
        let h = Harness::new(identity, FakeChain::with_slots(&[4, 9, 2, 7]));
        h.orchestrator.mount().await;

        let history = h.orchestrator.get_transaction_history(3).await;
        assert!(history.len() <= 3);
        assert!(history.windows(2).all(|w| w[0].slot >= w[1].slot));

        h.chain.set_failing(true);
        assert!(h.orchestrator.get_transaction_history(3).await.is_empty());
    }

    // ========== Persistence Tests ==========

    #[tokio::test]
    async fn test_restore_after_restart_without_rpc() {
        let store = Arc::new(MemoryStore::default());
        let first = Harness::with_store(FakeIdentity::signed_in(), FakeChain::default(), store.clone());
        let signer = first.install_signer(11);
        first.orchestrator.connect_external_solana_wallet().await.unwrap();
        drop(first);

        let restarted = Harness::with_store(FakeIdentity::signed_in(), FakeChain::default(), store);
        restarted.orchestrator.mount().await;

        let snapshot = restarted.orchestrator.snapshot();
        assert_eq!(snapshot.selected_wallet_type, Some(WalletKind::External));
        assert_eq!(snapshot.wallet_address, Some(signer.pubkey().to_string()));
        assert_eq!(restarted.chain.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_persisted_selection_is_discarded() {
        let store = Arc::new(MemoryStore::default());
        store.set_item(SELECTED_WALLET_KEY, "Solflare").await.unwrap();
        store.set_item(WALLET_ADDRESS_KEY, "not-a-key").await.unwrap();

        let h = Harness::with_store(FakeIdentity::signed_in(), FakeChain::default(), store);
        assert_eq!(h.orchestrator.restore_session().await, None);
        assert_eq!(h.orchestrator.selected_wallet_type(), None);
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_mount_selects_existing_embedded_wallet() {
        let identity = FakeIdentity::signed_in();
        identity.add_wallet(Arc::new(FakeEmbeddedWallet::new(21)));
        let h = Harness::new(identity, FakeChain::default());

        h.orchestrator.mount().await;

        assert_eq!(h.orchestrator.selected_wallet_type(), Some(WalletKind::Embedded));
        assert_eq!(
            h.orchestrator.wallet_address(),
            Some(Pubkey::new_from_array([21; 32]).to_string())
        );
    }

    #[tokio::test]
    async fn test_mount_auto_reconnects_live_session() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        let signer = h.install_signer(11);
        signer.set_session(true);

        h.orchestrator.mount().await;

        let snapshot = h.orchestrator.snapshot();
        assert!(snapshot.is_phantom_available);
        assert!(snapshot.external_wallet.is_some());
        assert_eq!(snapshot.selected_wallet_type, None);
        assert!(h.drain_events().is_empty());
    }

    // ========== Sign-out Tests ==========

    #[tokio::test]
    async fn test_sign_out_clears_everything() {
        let h = Harness::new(FakeIdentity::signed_in(), FakeChain::default());
        let signer = h.install_signer(11);
        h.orchestrator.create_embedded_wallet().await.unwrap();
        h.orchestrator.connect_external_solana_wallet().await.unwrap();

        h.orchestrator.sign_out().await.unwrap();

        let snapshot = h.orchestrator.snapshot();
        assert!(!snapshot.authenticated);
        assert_eq!(snapshot.selected_wallet_type, None);
        assert_eq!(snapshot.embedded_wallet, None);
        assert_eq!(snapshot.external_wallet, None);
        assert!(!signer.is_connected());
        assert_eq!(h.identity.logouts(), 1);
        assert!(h.store.is_empty());
    }
}
