use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::entity::{BotError, Token};
use crate::solana::tokens::constants::KNOWN_TOKENS;

/// Parse a human-readable amount. Runs before anything touches the network.
pub fn parse_amount(amount: &str) -> Result<Decimal, BotError> {
    let value = Decimal::from_str(amount.trim())
        .map_err(|_| BotError::InvalidAmount(format!("'{}' is not a number", amount)))?;

    if value <= Decimal::ZERO {
        return Err(BotError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }

    Ok(value.normalize())
}

/// Convert a human-readable amount into the token's base units.
///
/// Exact: amounts with more fractional digits than the token supports are
/// rejected rather than silently truncated.
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<u64, BotError> {
    let amount = amount.normalize();
    if amount.scale() > decimals as u32 {
        return Err(BotError::InvalidAmount(format!(
            "at most {} decimal places are supported for this token",
            decimals
        )));
    }

    let factor = 10u64
        .checked_pow(decimals as u32)
        .map(Decimal::from)
        .ok_or_else(|| BotError::InvalidAmount(format!("unsupported decimals: {}", decimals)))?;

    amount
        .checked_mul(factor)
        .and_then(|raw| raw.to_u64())
        .ok_or_else(|| BotError::InvalidAmount("amount is too large".to_string()))
}

/// Token metadata for mints that need no lookup
pub fn get_known_token(mint: &str) -> Option<Token> {
    KNOWN_TOKENS
        .iter()
        .find(|(_, known_mint, _, _)| *known_mint == mint)
        .map(|(symbol, mint, decimals, name)| Token {
            mint: mint.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals: *decimals,
        })
}

/// Get mint address from token symbol, or pass a mint through unchanged
pub fn resolve_mint(token: &str) -> String {
    let token = token.trim();
    KNOWN_TOKENS
        .iter()
        .find(|(symbol, _, _, _)| symbol.eq_ignore_ascii_case(token))
        .map(|(_, mint, _, _)| mint.to_string())
        .unwrap_or_else(|| token.to_string())
}
