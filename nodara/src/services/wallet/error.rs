//! Wallet connection errors.

use thiserror::Error;

/// Errors raised by the wallet providers and the orchestrator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// Embedded wallet creation or an external connect without a signed-in user.
    #[error("User is not authenticated")]
    NotAuthenticated,

    /// The identity provider already holds an embedded wallet.
    #[error("Embedded wallet already exists")]
    AlreadyExists,

    /// The external signer declined the request.
    #[error("Request rejected by the wallet")]
    UserRejected,

    #[error("Wallet connection error: {0}")]
    ConnectionError(String),

    /// The wallet does not expose the requested signing capability.
    #[error("Wallet does not support {0}")]
    UnsupportedOperation(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("No wallet available")]
    NoActiveWallet,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl WalletError {
    /// Notification text shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            WalletError::NotAuthenticated => "Please sign in before connecting a wallet.".to_string(),
            WalletError::AlreadyExists => "An embedded wallet already exists for this account.".to_string(),
            WalletError::UserRejected => "The request was rejected in your wallet.".to_string(),
            WalletError::ConnectionError(_) => "Failed to connect wallet. Please try again.".to_string(),
            WalletError::UnsupportedOperation(op) => format!("Wallet does not support {}.", op),
            WalletError::Network(_) => "Network request failed. Please try again.".to_string(),
            WalletError::NoActiveWallet => "No wallet available.".to_string(),
            WalletError::Storage(_) => "Could not save wallet settings.".to_string(),
        }
    }
}

impl From<lib_solana::RpcError> for WalletError {
    fn from(err: lib_solana::RpcError) -> Self {
        WalletError::Network(err.to_string())
    }
}
