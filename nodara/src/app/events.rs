//! # Application Events
//!
//! One-shot notifications sent from the wallet layer to whatever renders
//! them.

use async_channel::{Receiver, Sender};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// User-visible events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Short message with a title, shown once
    Notice {
        level: NoticeLevel,
        title: String,
        message: String,
    },
    /// External wallet is missing; offer the install page
    InstallPrompt { wallet: String, url: String },
}

impl AppEvent {
    pub fn title(&self) -> &str {
        match self {
            AppEvent::Notice { title, .. } => title,
            AppEvent::InstallPrompt { .. } => "Phantom Wallet Required",
        }
    }
}

/// Sending half of the event channel.
#[derive(Clone)]
pub struct Notifier {
    tx: Sender<AppEvent>,
}

impl Notifier {
    pub fn channel() -> (Self, Receiver<AppEvent>) {
        let (tx, rx) = async_channel::unbounded();
        (Self { tx }, rx)
    }

    fn send(&self, event: AppEvent) {
        // Nobody listening is fine.
        if self.tx.try_send(event).is_err() {
            debug!("Event dropped, no receiver");
        }
    }

    pub fn success(&self, title: &str, message: impl Into<String>) {
        self.send(AppEvent::Notice {
            level: NoticeLevel::Success,
            title: title.to_string(),
            message: message.into(),
        });
    }

    pub fn error(&self, title: &str, message: impl Into<String>) {
        self.send(AppEvent::Notice {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: message.into(),
        });
    }

    pub fn install_prompt(&self, wallet: &str, url: &str) {
        self.send(AppEvent::InstallPrompt {
            wallet: wallet.to_string(),
            url: url.to_string(),
        });
    }
}
