use jupiter_swap_api_client::quote::QuoteResponse;
use serde::Deserialize;

/// Token metadata as returned by Jupiter's token API
#[derive(Debug, Deserialize)]
pub struct JupiterToken {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

/// Parameters for a quote request, amounts already in base units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    pub slippage_bps: u16,
}

/// Best route the aggregator offered for a swap.
#[derive(Debug, Clone)]
pub struct Quote {
    pub in_amount: u64,
    pub out_amount: u64,
    pub route_hops: usize,
    response: Option<QuoteResponse>,
}

impl Quote {
    pub fn new(in_amount: u64, out_amount: u64, route_hops: usize) -> Self {
        Self {
            in_amount,
            out_amount,
            route_hops,
            response: None,
        }
    }

    pub(crate) fn from_jupiter(response: QuoteResponse) -> Self {
        Self {
            in_amount: response.in_amount,
            out_amount: response.out_amount,
            route_hops: response.route_plan.len(),
            response: Some(response),
        }
    }

    /// Raw Jupiter response, needed to build the swap transaction
    pub(crate) fn jupiter_response(&self) -> Option<&QuoteResponse> {
        self.response.as_ref()
    }
}

// Error codes Jupiter returns when no path exists between two mints
const NO_ROUTE_MARKERS: [&str; 4] = [
    "COULD_NOT_FIND_ANY_ROUTE",
    "NO_ROUTES_FOUND",
    "Could not find any route",
    "No routes found",
];

/// Whether a quote API error means "no route" rather than a transport failure
pub fn is_no_route_error(message: &str) -> bool {
    NO_ROUTE_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}
