use serde::Deserialize;

/// Jupiter endpoints and swap defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL for quote and swap API
    pub quote_api_url: String,

    /// URL for token metadata API
    pub tokens_api_url: String,

    /// Hosted swap page used for deep links
    pub swap_page_url: String,

    /// Slippage tolerance in basis points
    pub slippage_bps: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_api_url: "https://quote-api.jup.ag/v6".to_string(),
            tokens_api_url: "https://api.jup.ag/tokens/v1".to_string(),
            swap_page_url: "https://jup.ag/swap".to_string(),
            slippage_bps: 50,
        }
    }
}
