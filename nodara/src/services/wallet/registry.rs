//! In-process signer namespace.
//!
//! Signers register under a dotted path (`phantom.solana`); the
//! [`NamespaceProbe`](super::external::NamespaceProbe) looks them up.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::service::{ExternalSigner, SignerNamespace};

#[derive(Default)]
pub struct SignerRegistry {
    signers: RwLock<HashMap<String, Arc<dyn ExternalSigner>>>,
}

impl SignerRegistry {
    /// Register `signer` at `path`, replacing any previous entry.
    pub fn register(&self, path: impl Into<String>, signer: Arc<dyn ExternalSigner>) {
        self.signers.write().insert(path.into(), signer);
    }

    pub fn unregister(&self, path: &str) -> Option<Arc<dyn ExternalSigner>> {
        self.signers.write().remove(path)
    }

    pub fn is_empty(&self) -> bool {
        self.signers.read().is_empty()
    }
}

impl SignerNamespace for SignerRegistry {
    fn lookup(&self, path: &str) -> Option<Arc<dyn ExternalSigner>> {
        self.signers.read().get(path).cloned()
    }
}
