//! # Application Configuration
//!
//! Configuration loaded from environment variables (after `.env` is read by
//! the binary) and validated once on startup. The resulting [`AppConfig`] is
//! passed explicitly to [`crate::app::App::bootstrap`]; there is no global
//! instance.
//!
//! | Variable | Default |
//! |---|---|
//! | `NODARA_API_URL` | `https://api.nodara.network` |
//! | `NODARA_API_TIMEOUT_SECS` | `10` |
//! | `SOLANA_RPC_URL` | `https://api.mainnet-beta.solana.com` |
//! | `NODARA_DATA_DIR` | `data` |
//! | `NODARA_INSTALL_URL` | `https://phantom.app/download` |

use lib_utils::envs::{self, get_env_or};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.nodara.network";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_INSTALL_URL: &str = "https://phantom.app/download";

/// Application configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// REST API base URL, without a trailing slash.
    pub api_url: String,

    /// Per-request timeout of the REST client.
    ///
    /// Valid range: 1-120 seconds.
    pub api_timeout_secs: u64,

    /// Solana RPC endpoint.
    pub rpc_url: String,

    /// Directory holding the durable key-value file.
    pub data_dir: PathBuf,

    /// Where users are sent when the external wallet is not installed.
    pub install_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            rpc_url: lib_solana::client::MAINNET_RPC_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            install_url: DEFAULT_INSTALL_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let api_timeout_secs = match envs::get_env_parse::<u64>("NODARA_API_TIMEOUT_SECS") {
            Ok(secs) => secs,
            Err(envs::Error::MissingEnv(_)) => DEFAULT_API_TIMEOUT_SECS,
            Err(envs::Error::WrongFormat(name)) => {
                return Err(format!("{} must be a whole number of seconds", name));
            }
        };

        Ok(Self {
            api_url: get_env_or("NODARA_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            api_timeout_secs,
            rpc_url: get_env_or("SOLANA_RPC_URL", lib_solana::client::MAINNET_RPC_URL),
            data_dir: PathBuf::from(get_env_or("NODARA_DATA_DIR", DEFAULT_DATA_DIR)),
            install_url: get_env_or("NODARA_INSTALL_URL", DEFAULT_INSTALL_URL),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("NODARA_API_URL", &self.api_url),
            ("SOLANA_RPC_URL", &self.rpc_url),
            ("NODARA_INSTALL_URL", &self.install_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        if self.api_timeout_secs < 1 || self.api_timeout_secs > 120 {
            return Err("NODARA_API_TIMEOUT_SECS must be between 1 and 120".to_string());
        }

        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    /// Path of the durable key-value file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("wallet-store.json")
    }
}
