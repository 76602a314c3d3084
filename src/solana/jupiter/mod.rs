pub mod config;
pub mod models;
pub mod quote_service;
pub mod swap_service;
pub mod token_repository;

pub use self::config::Config;
pub use models::{Quote, QuoteParams};
pub use quote_service::{JupiterQuoteService, QuoteService};
pub use swap_service::{JupiterSwapService, SwapService};
pub use token_repository::{JupiterTokenRepository, TokenRepository};
