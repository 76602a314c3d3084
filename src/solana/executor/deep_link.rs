use async_trait::async_trait;
use log::info;
use reqwest::Url;

use super::{SwapExecutor, SwapOutcome, SwapStrategy, WalletContext};
use crate::entity::{BotError, SwapRequest, WalletSession};

/// Build the hosted swap page URL for a request.
///
/// Deterministic and offline: the three parameters are form-url-encoded onto
/// `base` in a fixed order.
pub fn build_swap_url(base: &str, request: &SwapRequest) -> Result<Url, BotError> {
    Url::parse_with_params(
        base,
        &[
            ("inputMint", request.input_mint.as_str()),
            ("outputMint", request.output_mint.as_str()),
            ("amount", request.amount.as_str()),
        ],
    )
    .map_err(|e| BotError::Unclassified(format!("invalid swap page URL '{}': {}", base, e)))
}

/// Delegates the whole swap to Jupiter's own UI
pub struct DeepLinkExecutor {
    swap_page_url: String,
}

impl DeepLinkExecutor {
    pub fn new(swap_page_url: impl Into<String>) -> Self {
        Self {
            swap_page_url: swap_page_url.into(),
        }
    }

    /// Link for a connected session. Without a connection the affordance
    /// stays inert and no link is produced.
    pub fn link_for(&self, session: &WalletSession, request: &SwapRequest) -> Result<Url, BotError> {
        if !session.connected {
            return Err(BotError::WalletNotConnected);
        }
        build_swap_url(&self.swap_page_url, request)
    }
}

#[async_trait]
impl SwapExecutor for DeepLinkExecutor {
    fn strategy(&self) -> SwapStrategy {
        SwapStrategy::DeepLink
    }

    async fn execute(
        &self,
        request: &SwapRequest,
        wallet: &WalletContext,
    ) -> Result<SwapOutcome, BotError> {
        let url = self.link_for(&wallet.session, request)?;
        info!("Built Jupiter deep link: {}", url);

        Ok(SwapOutcome::DeepLink {
            url: url.to_string(),
        })
    }
}
