use async_trait::async_trait;
use log::{debug, error, info};
use std::sync::Arc;

use super::{SwapExecutor, SwapOutcome, SwapStrategy, WalletContext};
use crate::entity::{BotError, SwapRequest};
use crate::solana::jupiter::{QuoteParams, QuoteService, SwapService, TokenRepository};
use crate::solana::transaction::TransactionSender;
use crate::solana::utils::{parse_amount, resolve_mint};

/// Quotes, builds, signs, submits and confirms the swap from the bot.
pub struct TransactionalExecutor {
    token_repository: Arc<dyn TokenRepository>,
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapService>,
    connection: Arc<dyn TransactionSender>,
    slippage_bps: u16,
}

impl TransactionalExecutor {
    pub fn new(
        token_repository: Arc<dyn TokenRepository>,
        quote_service: Arc<dyn QuoteService>,
        swap_service: Arc<dyn SwapService>,
        connection: Arc<dyn TransactionSender>,
        slippage_bps: u16,
    ) -> Self {
        Self {
            token_repository,
            quote_service,
            swap_service,
            connection,
            slippage_bps,
        }
    }

    /// Resolve symbols and scale the amount with the input token's decimals
    async fn quote_params(&self, request: &SwapRequest) -> Result<QuoteParams, BotError> {
        let amount = parse_amount(&request.amount)?;
        let input_mint = resolve_mint(&request.input_mint);
        let output_mint = resolve_mint(&request.output_mint);

        if input_mint == output_mint {
            return Err(BotError::InvalidMint(
                "input and output tokens must be different".to_string(),
            ));
        }

        let input_token = self
            .token_repository
            .get_token_by_id(&input_mint)
            .await
            .map_err(|e| {
                error!("Failed to load token {}: {}", input_mint, e);
                BotError::InvalidMint(input_mint.clone())
            })?;

        let raw_amount = input_token.base_units(amount)?;
        debug!(
            "Converted {} {} to {} base units ({} decimals)",
            amount, input_token.symbol, raw_amount, input_token.decimals
        );

        Ok(QuoteParams {
            input_mint,
            output_mint,
            amount: raw_amount,
            slippage_bps: self.slippage_bps,
        })
    }
}

#[async_trait]
impl SwapExecutor for TransactionalExecutor {
    fn strategy(&self) -> SwapStrategy {
        SwapStrategy::Transactional
    }

    async fn execute(
        &self,
        request: &SwapRequest,
        wallet: &WalletContext,
    ) -> Result<SwapOutcome, BotError> {
        let (user, provider) = match (wallet.session.account(), wallet.provider.as_ref()) {
            (Some(user), Some(provider)) => (user, provider),
            _ => return Err(BotError::WalletNotConnected),
        };

        let params = self.quote_params(request).await?;

        info!(
            "Getting swap quote for {} {} to {}",
            params.amount, params.input_mint, params.output_mint
        );
        let quote = self.quote_service.get_swap_quote(&params).await?;
        info!(
            "Quoted {} -> {} base units over {} hop(s)",
            quote.in_amount, quote.out_amount, quote.route_hops
        );

        let transaction = self
            .swap_service
            .build_swap_transaction(&quote, &user)
            .await?;

        let signature = provider
            .send_transaction(transaction, self.connection.as_ref())
            .await?;
        info!("Swap submitted: {}", signature);

        self.connection.confirm(&signature).await?;

        Ok(SwapOutcome::Confirmed { signature })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Token, WalletSession};
    use crate::solana::jupiter::Quote;
    use crate::solana::wallet::WalletProvider;
    use anyhow::anyhow;
    use solana_sdk::hash::Hash;
    use solana_sdk::message::{v0, VersionedMessage};
    use solana_sdk::pubkey::Pubkey;
    use solana_sdk::signature::Signature;
    use solana_sdk::transaction::VersionedTransaction;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedDecimals {
        decimals: u8,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenRepository for FixedDecimals {
        async fn get_token_by_id(&self, token_id: &str) -> anyhow::Result<Token> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if token_id == "missing" {
                return Err(anyhow!("unknown token"));
            }
            Ok(Token {
                mint: token_id.to_string(),
                symbol: "TKN".to_string(),
                name: "Token".to_string(),
                decimals: self.decimals,
            })
        }
    }

    #[derive(Default)]
    struct ScriptedQuotes {
        no_route: bool,
        seen: Mutex<Vec<QuoteParams>>,
    }

    #[async_trait]
    impl QuoteService for ScriptedQuotes {
        async fn get_swap_quote(&self, params: &QuoteParams) -> Result<Quote, BotError> {
            self.seen.lock().unwrap().push(params.clone());
            if self.no_route {
                return Err(BotError::NoRoute);
            }
            Ok(Quote::new(params.amount, 42, 1))
        }
    }

    struct EmptyTransactions;

    #[async_trait]
    impl SwapService for EmptyTransactions {
        async fn build_swap_transaction(
            &self,
            _quote: &Quote,
            user_public_key: &Pubkey,
        ) -> Result<VersionedTransaction, BotError> {
            let message =
                v0::Message::try_compile(user_public_key, &[], &[], Hash::default()).unwrap();
            Ok(VersionedTransaction {
                signatures: vec![Signature::default()],
                message: VersionedMessage::V0(message),
            })
        }
    }

    struct ScriptedConnection {
        confirm_result: fn(&Signature) -> Result<(), BotError>,
    }

    #[async_trait]
    impl TransactionSender for ScriptedConnection {
        async fn send(&self, _transaction: &VersionedTransaction) -> Result<Signature, BotError> {
            Ok(Signature::from([7u8; 64]))
        }

        async fn confirm(&self, signature: &Signature) -> Result<(), BotError> {
            (self.confirm_result)(signature)
        }
    }

    struct PassThroughWallet {
        key: Pubkey,
    }

    #[async_trait]
    impl WalletProvider for PassThroughWallet {
        fn name(&self) -> &str {
            "test"
        }

        fn is_available_to(&self, _user_id: u64) -> bool {
            true
        }

        async fn connect(&self) -> Result<Pubkey, BotError> {
            Ok(self.key)
        }

        async fn send_transaction(
            &self,
            transaction: VersionedTransaction,
            connection: &dyn TransactionSender,
        ) -> Result<Signature, BotError> {
            connection.send(&transaction).await
        }
    }

    struct Fixture {
        tokens: Arc<FixedDecimals>,
        quotes: Arc<ScriptedQuotes>,
        executor: TransactionalExecutor,
    }

    fn fixture(no_route: bool, confirm_result: fn(&Signature) -> Result<(), BotError>) -> Fixture {
        let tokens = Arc::new(FixedDecimals {
            decimals: 9,
            calls: AtomicUsize::new(0),
        });
        let quotes = Arc::new(ScriptedQuotes {
            no_route,
            ..ScriptedQuotes::default()
        });
        let executor = TransactionalExecutor::new(
            tokens.clone(),
            quotes.clone(),
            Arc::new(EmptyTransactions),
            Arc::new(ScriptedConnection { confirm_result }),
            50,
        );
        Fixture {
            tokens,
            quotes,
            executor,
        }
    }

    fn connected() -> WalletContext {
        let key = Pubkey::new_unique();
        WalletContext {
            session: WalletSession::connected(key),
            provider: Some(Arc::new(PassThroughWallet { key })),
        }
    }

    fn request(amount: &str) -> SwapRequest {
        SwapRequest {
            input_mint: "InputMint".to_string(),
            output_mint: "OutputMint".to_string(),
            amount: amount.to_string(),
        }
    }

    #[tokio::test]
    async fn confirmed_swap_returns_the_signature() {
        let fx = fixture(false, |_| Ok(()));

        let outcome = fx.executor.execute(&request("3"), &connected()).await.unwrap();

        assert_eq!(
            outcome,
            SwapOutcome::Confirmed {
                signature: Signature::from([7u8; 64])
            }
        );
        let seen = fx.quotes.seen.lock().unwrap();
        assert_eq!(seen[0].amount, 3_000_000_000);
        assert_eq!(seen[0].slippage_bps, 50);
    }

    #[tokio::test]
    async fn disconnected_wallet_fails_first() {
        let fx = fixture(false, |_| Ok(()));

        let result = fx
            .executor
            .execute(&request("3"), &WalletContext::disconnected())
            .await;

        assert!(matches!(result, Err(BotError::WalletNotConnected)));
        assert_eq!(fx.tokens.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_numeric_amount_is_rejected_before_any_lookup() {
        let fx = fixture(false, |_| Ok(()));

        let result = fx.executor.execute(&request("ten"), &connected()).await;

        assert!(matches!(result, Err(BotError::InvalidAmount(_))));
        assert_eq!(fx.tokens.calls.load(Ordering::SeqCst), 0);
        assert!(fx.quotes.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_route_is_reported_as_such() {
        let fx = fixture(true, |_| Ok(()));

        let result = fx.executor.execute(&request("1"), &connected()).await;

        assert!(matches!(result, Err(BotError::NoRoute)));
    }

    #[tokio::test]
    async fn confirmation_timeout_is_not_success() {
        let fx = fixture(false, |sig| {
            Err(BotError::ConfirmationTimeout {
                signature: sig.to_string(),
            })
        });

        let result = fx.executor.execute(&request("1"), &connected()).await;

        match result {
            Err(err @ BotError::ConfirmationTimeout { .. }) => assert!(err.is_retryable()),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_input_token_is_a_parameter_error() {
        let fx = fixture(false, |_| Ok(()));
        let mut req = request("1");
        req.input_mint = "missing".to_string();

        let result = fx.executor.execute(&req, &connected()).await;

        assert!(matches!(result, Err(BotError::InvalidMint(mint)) if mint == "missing"));
    }

    #[tokio::test]
    async fn identical_tokens_are_rejected() {
        let fx = fixture(false, |_| Ok(()));
        let mut req = request("1");
        req.output_mint = "InputMint".to_string();

        let result = fx.executor.execute(&req, &connected()).await;

        assert!(matches!(result, Err(BotError::InvalidMint(_))));
    }
}
