//! Identity providers that live in this process.
//!
//! - [`AnonymousIdentity`]: nobody is signed in, so no embedded wallet can exist
//! - [`LocalIdentity`]: a signed-in user whose embedded wallets are
//!   in-memory keypairs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

use super::embedded::KeypairWallet;
use super::error::WalletError;
use crate::core::service::{EmbeddedWallet, IdentityProvider, IdentityUser};

#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousIdentity;

#[async_trait]
impl IdentityProvider for AnonymousIdentity {
    fn user(&self) -> Option<IdentityUser> {
        None
    }

    async fn logout(&self) -> Result<(), WalletError> {
        Ok(())
    }

    fn embedded_wallets(&self) -> Vec<Arc<dyn EmbeddedWallet>> {
        Vec::new()
    }

    async fn create_embedded_wallet(&self) -> Result<Arc<dyn EmbeddedWallet>, WalletError> {
        Err(WalletError::NotAuthenticated)
    }
}

#[derive(Default)]
pub struct LocalIdentity {
    user: RwLock<Option<IdentityUser>>,
    wallets: RwLock<Vec<Arc<dyn EmbeddedWallet>>>,
}

impl LocalIdentity {
    pub fn signed_in(user: IdentityUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
            wallets: RwLock::new(Vec::new()),
        }
    }

    pub fn sign_in(&self, user: IdentityUser) {
        *self.user.write() = Some(user);
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    fn user(&self) -> Option<IdentityUser> {
        self.user.read().clone()
    }

    async fn logout(&self) -> Result<(), WalletError> {
        *self.user.write() = None;
        self.wallets.write().clear();
        Ok(())
    }

    fn embedded_wallets(&self) -> Vec<Arc<dyn EmbeddedWallet>> {
        self.wallets.read().clone()
    }

    async fn create_embedded_wallet(&self) -> Result<Arc<dyn EmbeddedWallet>, WalletError> {
        if self.user.read().is_none() {
            return Err(WalletError::NotAuthenticated);
        }
        let wallet: Arc<dyn EmbeddedWallet> = Arc::new(KeypairWallet::generate());
        info!(address = %wallet.address(), "Generated embedded keypair");
        self.wallets.write().push(wallet.clone());
        Ok(wallet)
    }
}
