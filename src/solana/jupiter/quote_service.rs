use anyhow::Result;
use async_trait::async_trait;
use jupiter_swap_api_client::quote::QuoteRequest;
use jupiter_swap_api_client::JupiterSwapApiClient;
use log::{debug, info};

use crate::entity::BotError;
use crate::solana::jupiter::models::{is_no_route_error, Quote, QuoteParams};
use crate::solana::jupiter::Config;
use crate::solana::wallet::parse_pubkey;

/// Aggregator route lookup
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Best route for the swap, or `BotError::NoRoute` when none exists
    async fn get_swap_quote(&self, params: &QuoteParams) -> Result<Quote, BotError>;
}

/// Quote service backed by the Jupiter SDK
pub struct JupiterQuoteService {
    jupiter_client: JupiterSwapApiClient,
}

impl JupiterQuoteService {
    pub fn new(config: &Config) -> Self {
        Self {
            jupiter_client: JupiterSwapApiClient::new(config.quote_api_url.clone()),
        }
    }
}

#[async_trait]
impl QuoteService for JupiterQuoteService {
    async fn get_swap_quote(&self, params: &QuoteParams) -> Result<Quote, BotError> {
        let input_mint = parse_pubkey(&params.input_mint)?;
        let output_mint = parse_pubkey(&params.output_mint)?;

        let quote_request = QuoteRequest {
            amount: params.amount,
            input_mint,
            output_mint,
            slippage_bps: params.slippage_bps,
            ..QuoteRequest::default()
        };

        debug!("Requesting quote with parameters: {:?}", quote_request);

        let quote_response = self
            .jupiter_client
            .quote(&quote_request)
            .await
            .map_err(|e| {
                let message = e.to_string();
                if is_no_route_error(&message) {
                    BotError::NoRoute
                } else {
                    BotError::QuoteFailed(message)
                }
            })?;

        if quote_response.route_plan.is_empty() {
            return Err(BotError::NoRoute);
        }

        info!(
            "Quote received successfully: input_amount={}, output_amount={}",
            quote_response.in_amount, quote_response.out_amount
        );

        Ok(Quote::from_jupiter(quote_response))
    }
}
