//! Wallet handles, capabilities and state snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which provider backs a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Embedded,
    External,
}

impl WalletKind {
    /// Provider name written to durable storage.
    pub fn provider_name(&self) -> &'static str {
        match self {
            WalletKind::Embedded => "Embedded",
            WalletKind::External => "Phantom",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletKind::Embedded => write!(f, "embedded"),
            WalletKind::External => write!(f, "external"),
        }
    }
}

impl FromStr for WalletKind {
    type Err = String;

    /// Accepts the persisted provider names as well as the kind names, in
    /// any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embedded" => Ok(WalletKind::Embedded),
            "external" | "phantom" => Ok(WalletKind::External),
            other => Err(format!("Unknown wallet provider: {}", other)),
        }
    }
}

/// Read-only view of a provider's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletHandle {
    pub kind: WalletKind,
    /// Base58 public key.
    pub address: String,
    pub connected: bool,
}

impl WalletHandle {
    pub fn new(kind: WalletKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
            connected: true,
        }
    }
}

/// Signing support of a wallet, fixed when the wallet is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletCapability {
    pub kind: WalletKind,
    pub can_sign_message: bool,
    pub can_sign_transaction: bool,
}

/// Per-provider connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl SlotStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, SlotStatus::Connected)
    }
}

/// Result of a connect action that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(WalletHandle),
    /// The external signer is not installed; the user was pointed to the
    /// install page instead.
    InstallPrompted,
    /// Another connect action is already in flight; nothing was done.
    Busy,
}

/// Everything the UI reads about the wallet layer at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletSnapshot {
    pub authenticated: bool,
    pub is_connecting: bool,
    pub selected_wallet_type: Option<WalletKind>,
    pub embedded_wallet: Option<WalletHandle>,
    pub external_wallet: Option<WalletHandle>,
    pub active_wallet: Option<WalletHandle>,
    pub wallet_address: Option<String>,
    pub is_phantom_available: bool,
}

impl WalletSnapshot {
    /// Connected when the active wallet is live and the user signed in, or
    /// when an external wallet is connected on its own.
    pub fn is_connected(&self) -> bool {
        let active = self
            .active_wallet
            .as_ref()
            .map(|w| w.connected)
            .unwrap_or(false);
        let external = self
            .external_wallet
            .as_ref()
            .map(|w| w.connected)
            .unwrap_or(false);
        (active && self.authenticated) || external
    }
}
