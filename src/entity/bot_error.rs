/// Usage hint shown whenever the swap link is incomplete.
pub const USAGE_HINT: &str =
    "Missing URL parameters. Usage: ?input=INPUT_MINT&output=OUTPUT_MINT&amount=AMOUNT";

/// Broad class of a failure, used to pick how it is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parameter,
    Wallet,
    Swap,
    Unclassified,
}

/// Every failure a user can run into. The `Display` text is what ends up in the
/// error banner, so keep it short and free of internal detail.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("{}", USAGE_HINT)]
    MissingParameters,

    #[error("Invalid token address: {0}")]
    InvalidMint(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("No wallet found. Configure a wallet for this bot and try again.")]
    ProviderNotFound,

    #[error("Wallet connection was rejected.")]
    ConnectionRejected,

    #[error("Wallet not connected. Connect your wallet first.")]
    WalletNotConnected,

    #[error("The transaction does not belong to the connected wallet.")]
    WalletMismatch,

    #[error("Only the wallet owner can do this.")]
    NotWalletOwner,

    #[error("This swap page was replaced by a newer link. Use the latest one.")]
    StalePage,

    #[error("No route found. Try a different pair or amount.")]
    NoRoute,

    #[error("Failed to get a quote: {0}")]
    QuoteFailed(String),

    #[error("Failed to build the swap transaction: {0}")]
    BuildFailed(String),

    #[error("Transaction was rejected: {0}")]
    SubmissionRejected(String),

    #[error("Transaction {signature} was not confirmed in time. Check the explorer before retrying.")]
    ConfirmationTimeout { signature: String },

    #[error("Transaction failed on chain: {0}")]
    TransactionFailed(String),

    #[error("A swap is already in progress.")]
    OperationInProgress,

    #[error("Something went wrong: {0}")]
    Unclassified(String),
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::MissingParameters
            | BotError::InvalidMint(_)
            | BotError::InvalidAmount(_)
            | BotError::StalePage => ErrorKind::Parameter,
            BotError::ProviderNotFound
            | BotError::ConnectionRejected
            | BotError::WalletNotConnected
            | BotError::WalletMismatch
            | BotError::NotWalletOwner => ErrorKind::Wallet,
            BotError::NoRoute
            | BotError::QuoteFailed(_)
            | BotError::BuildFailed(_)
            | BotError::SubmissionRejected(_)
            | BotError::ConfirmationTimeout { .. }
            | BotError::TransactionFailed(_)
            | BotError::OperationInProgress => ErrorKind::Swap,
            BotError::Unclassified(_) => ErrorKind::Unclassified,
        }
    }

    /// Whether pressing the button again may succeed without changing anything.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BotError::ConfirmationTimeout { .. }
                | BotError::QuoteFailed(_)
                | BotError::OperationInProgress
                | BotError::Unclassified(_)
        )
    }
}

impl From<anyhow::Error> for BotError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<BotError>() {
            Ok(bot_error) => bot_error,
            Err(other) => BotError::Unclassified(other.to_string()),
        }
    }
}
