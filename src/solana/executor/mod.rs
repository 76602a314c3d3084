//! Swap execution strategies.
//!
//! Both strategies sit behind [`SwapExecutor`]; which one the bot uses is a
//! configuration choice (`SWAP_STRATEGY`).

pub mod deep_link;
pub mod transactional;

use async_trait::async_trait;
use serde::Deserialize;
use solana_sdk::signature::Signature;
use std::fmt;
use std::sync::Arc;

use crate::entity::{BotError, SwapRequest, WalletSession};
use crate::solana::wallet::WalletProvider;

pub use deep_link::{build_swap_url, DeepLinkExecutor};
pub use transactional::TransactionalExecutor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStrategy {
    /// Hand the swap over to Jupiter's hosted page
    #[default]
    DeepLink,
    /// Quote, sign and submit from the bot
    Transactional,
}

impl fmt::Display for SwapStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::DeepLink => write!(f, "deep_link"),
            Self::Transactional => write!(f, "transactional"),
        }
    }
}

/// Wallet handed to an executor: the observed session plus the provider
/// that can sign for it.
#[derive(Clone)]
pub struct WalletContext {
    pub session: WalletSession,
    pub provider: Option<Arc<dyn WalletProvider>>,
}

impl WalletContext {
    pub fn disconnected() -> Self {
        Self {
            session: WalletSession::disconnected(),
            provider: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    DeepLink { url: String },
    Confirmed { signature: Signature },
}

#[async_trait]
pub trait SwapExecutor: Send + Sync {
    fn strategy(&self) -> SwapStrategy;

    async fn execute(
        &self,
        request: &SwapRequest,
        wallet: &WalletContext,
    ) -> Result<SwapOutcome, BotError>;
}
