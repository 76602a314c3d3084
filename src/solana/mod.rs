// Re-export everything from submodules
pub mod client;
pub mod executor;
pub mod jupiter;
pub mod tokens;
pub mod transaction;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::create_solana_client;
pub use executor::{SwapExecutor, SwapOutcome, SwapStrategy, WalletContext};
pub use tokens::constants::{SOL_MINT, USDC_MINT, USDT_MINT};
pub use transaction::{RpcTransactionSender, TransactionSender};
pub use wallet::{keypair_from_base58, keypair_from_file, KeypairWalletProvider, WalletProvider};
