use anyhow::Result;
use async_trait::async_trait;
use jupiter_swap_api_client::{
    swap::SwapRequest as JupiterSwapRequest, transaction_config::TransactionConfig,
    JupiterSwapApiClient,
};
use log::{debug, info};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;
use std::collections::HashMap;

use crate::entity::BotError;
use crate::solana::jupiter::models::Quote;
use crate::solana::jupiter::Config;

/// Turns a quote into an unsigned transaction for the user's wallet
#[async_trait]
pub trait SwapService: Send + Sync {
    async fn build_swap_transaction(
        &self,
        quote: &Quote,
        user_public_key: &Pubkey,
    ) -> Result<VersionedTransaction, BotError>;
}

/// Service for building swap transactions using Jupiter
pub struct JupiterSwapService {
    jupiter_client: JupiterSwapApiClient,
}

impl JupiterSwapService {
    pub fn new(config: &Config) -> Self {
        Self {
            jupiter_client: JupiterSwapApiClient::new(config.quote_api_url.clone()),
        }
    }
}

#[async_trait]
impl SwapService for JupiterSwapService {
    async fn build_swap_transaction(
        &self,
        quote: &Quote,
        user_public_key: &Pubkey,
    ) -> Result<VersionedTransaction, BotError> {
        let quote_response = quote.jupiter_response().cloned().ok_or_else(|| {
            BotError::BuildFailed("quote was not produced by Jupiter".to_string())
        })?;

        let swap_request = JupiterSwapRequest {
            user_public_key: *user_public_key,
            quote_response,
            config: TransactionConfig::default(),
        };

        debug!(
            "Requesting swap transaction with user_public_key: {}",
            user_public_key
        );

        let swap_response = self
            .jupiter_client
            .swap(&swap_request, Some(HashMap::new()))
            .await
            .map_err(|e| BotError::BuildFailed(e.to_string()))?;

        info!(
            "Swap transaction received: tx_length={}",
            swap_response.swap_transaction.len()
        );

        bincode::deserialize::<VersionedTransaction>(&swap_response.swap_transaction)
            .map_err(|e| BotError::BuildFailed(format!("failed to decode transaction: {}", e)))
    }
}
