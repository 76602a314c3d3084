use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use solana_client::nonblocking::rpc_client::RpcClient;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::entity::Token;
use crate::solana::jupiter::models::JupiterToken;
use crate::solana::jupiter::Config;
use crate::solana::utils::get_known_token;
use crate::solana::wallet::parse_pubkey;

/// Repository for working with tokens
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Get token information by its mint address
    async fn get_token_by_id(&self, token_id: &str) -> Result<Token>;
}

/// Token metadata from Jupiter, with the mint account as a fallback
pub struct JupiterTokenRepository {
    http_client: Client,
    solana_client: Arc<RpcClient>,
    tokens_api_url: String,
    token_cache: Mutex<HashMap<String, Token>>,
}

impl JupiterTokenRepository {
    pub fn new(config: &Config, solana_client: Arc<RpcClient>) -> Self {
        Self {
            http_client: Client::new(),
            solana_client,
            tokens_api_url: config.tokens_api_url.trim_end_matches('/').to_string(),
            token_cache: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, token_id: &str) -> Option<Token> {
        self.token_cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(token_id).cloned())
    }

    fn remember(&self, token: &Token) {
        if let Ok(mut cache) = self.token_cache.lock() {
            cache.insert(token.mint.clone(), token.clone());
        }
    }

    async fn fetch_from_api(&self, token_id: &str) -> Result<Token> {
        let url = format!("{}/token/{}", self.tokens_api_url, token_id);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            error!("Failed to fetch token from Jupiter API: {}", e);
            anyhow!("Failed to fetch token from API: {}", e)
        })?;

        info!(
            "Jupiter API response: {} for token {}",
            response.status(),
            token_id
        );

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Jupiter API error: {}", error_text));
        }

        let jupiter_token: JupiterToken = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse token response: {}", e))?;

        Ok(Token {
            mint: jupiter_token.address,
            symbol: jupiter_token.symbol,
            name: jupiter_token.name,
            decimals: jupiter_token.decimals,
        })
    }

    async fn fetch_from_chain(&self, token_id: &str) -> Result<Token> {
        let mint = parse_pubkey(token_id)?;
        let supply = self
            .solana_client
            .get_token_supply(&mint)
            .await
            .map_err(|e| anyhow!("Failed to read mint {}: {}", token_id, e))?;

        Ok(Token {
            mint: token_id.to_string(),
            symbol: "Unknown".to_string(),
            name: token_id.to_string(),
            decimals: supply.decimals,
        })
    }
}

#[async_trait]
impl TokenRepository for JupiterTokenRepository {
    async fn get_token_by_id(&self, token_id: &str) -> Result<Token> {
        if let Some(token) = get_known_token(token_id) {
            return Ok(token);
        }

        if let Some(token) = self.cached(token_id) {
            return Ok(token);
        }

        let token = match self.fetch_from_api(token_id).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Falling back to on-chain mint data for {}: {}", token_id, e);
                self.fetch_from_chain(token_id).await?
            }
        };

        self.remember(&token);

        Ok(token)
    }
}
