use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::BotError;
use crate::solana::utils::to_base_units;

/// Mint metadata needed to turn a human amount into base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub mint: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

impl Token {
    pub fn base_units(&self, amount: Decimal) -> Result<u64, BotError> {
        to_base_units(amount, self.decimals)
    }
}
