// Known token information
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";

// Define token decimals
pub const SOL_DECIMALS: u8 = 9;
pub const USDC_DECIMALS: u8 = 6;
pub const USDT_DECIMALS: u8 = 6;

/// (symbol, mint, decimals, name) for tokens that never need a metadata lookup
pub const KNOWN_TOKENS: [(&str, &str, u8, &str); 3] = [
    ("SOL", SOL_MINT, SOL_DECIMALS, "Wrapped SOL"),
    ("USDC", USDC_MINT, USDC_DECIMALS, "USD Coin"),
    ("USDT", USDT_MINT, USDT_DECIMALS, "USDT"),
];
