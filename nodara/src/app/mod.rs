//! # Application Wiring
//!
//! [`App::bootstrap`] builds the single orchestrator, the REST client and the
//! event channel once at startup and hands them out explicitly. Nothing here
//! is global; tests build as many apps as they like.
//!
//! ```text
//! ┌──────────────┐   actions    ┌────────────────────┐
//! │ UI / CLI     │ ───────────► │ WalletContext      │
//! │              │ ◄─────────── │  (orchestrator)    │
//! └──────┬───────┘  snapshots   └─────────┬──────────┘
//!        │                                │ notices
//!        │ REST                           ▼
//!        ▼                       async_channel<AppEvent>
//!   ApiClient
//! ```

pub mod context;
pub mod events;

pub use context::{WalletContext, WalletOption};
pub use events::{AppEvent, NoticeLevel, Notifier};

use async_channel::Receiver;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::services::api::ApiClient;
use crate::services::wallet::{WalletDeps, WalletOrchestrator};

/// Long-lived application services.
pub struct App {
    pub config: AppConfig,
    pub api: Arc<ApiClient>,
    pub wallet: WalletContext,
    pub events: Receiver<AppEvent>,
}

impl App {
    /// Wire the services together. Does not touch the network or storage;
    /// call [`WalletContext::mount`] to restore the previous session.
    pub fn bootstrap(config: AppConfig, deps: WalletDeps) -> Self {
        let (notifier, events) = Notifier::channel();
        let orchestrator = WalletOrchestrator::new(deps, notifier, config.install_url.clone());
        let api = Arc::new(ApiClient::from_config(&config));

        info!(api_url = %config.api_url, rpc_url = %config.rpc_url, "Application bootstrapped");

        Self {
            config,
            api,
            wallet: WalletContext::new(Arc::new(orchestrator)),
            events,
        }
    }

    /// Events that arrived since the last call, oldest first.
    pub fn drain_events(&self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.events.try_recv().ok()).collect()
    }
}
