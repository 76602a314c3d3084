use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::solana::executor::SwapStrategy;
use crate::solana::jupiter::Config as JupiterConfig;

/// Application configuration.
///
/// Read from an optional `config.toml` in the working directory, then from
/// environment variables. Nested keys use a double underscore, e.g.
/// `JUPITER__SLIPPAGE_BPS=100` or `WALLET__KEYPAIR_PATH=~/.config/solana/id.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,

    #[serde(default = "default_rpc_url")]
    pub solana_rpc_url: String,

    /// Cluster name used in explorer links
    #[serde(default = "default_cluster")]
    pub cluster: String,

    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,

    #[serde(default)]
    pub swap_strategy: SwapStrategy,

    #[serde(default)]
    pub jupiter: JupiterConfig,

    #[serde(default)]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub confirmation: ConfirmationConfig,
}

/// Local signer the bot connects on the user's behalf.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Solana CLI keypair file (JSON array of 64 bytes)
    pub keypair_path: Option<String>,

    /// Base58-encoded 64-byte secret key, used when no file is given
    pub keypair_base58: Option<String>,

    /// Telegram user id of the only user who may use this wallet. Required
    /// whenever a keypair is configured.
    pub owner_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            poll_interval_ms: 500,
        }
    }
}

impl ConfirmationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_rpc_url() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

fn default_cluster() -> String {
    "mainnet-beta".to_string()
}

fn default_explorer_url() -> String {
    "https://explorer.solana.com".to_string()
}

impl AppConfig {
    /// Loads configuration from `config.toml` (optional) and the environment.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize::<AppConfig>()
            .context("Invalid configuration (is TELEGRAM_BOT_TOKEN set?)")
    }
}
