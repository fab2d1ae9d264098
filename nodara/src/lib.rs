//! # Nodara Client - Library Root
//!
//! Wallet connection layer and REST client for the Nodara network app.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              nodara (this crate)                       │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - bootstrap, WalletContext, event channel  │
//! │  services   - wallet providers + orchestrator,         │
//! │               REST API client, durable storage         │
//! │  core       - seam traits, AppError                    │
//! │  config     - AppConfig from environment               │
//! │  debug      - tracing setup                            │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP                         │ Solana RPC
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Nodara API     │          │   Solana Network        │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Wallets
//!
//! Two providers sit behind one [`services::wallet::WalletOrchestrator`]:
//! an embedded wallet managed by the identity provider, and an external
//! Phantom-style signer discovered at runtime. The orchestrator tracks which
//! one is active, persists that choice, and serves balance and history reads
//! for it. UI code talks to it through [`app::WalletContext`].

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
