use solana_sdk::pubkey::Pubkey;

/// Connection state of the wallet as observed by the bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub connected: bool,
    pub public_key: Option<Pubkey>,
}

impl WalletSession {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(public_key: Pubkey) -> Self {
        Self {
            connected: true,
            public_key: Some(public_key),
        }
    }

    /// Public key of a connected wallet, `None` otherwise.
    pub fn account(&self) -> Option<Pubkey> {
        if self.connected {
            self.public_key
        } else {
            None
        }
    }
}
