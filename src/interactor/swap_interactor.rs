use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

use crate::entity::{BotError, SwapRequest, SwapResult};
use crate::interactor::busy_guard::BusyRegistry;
use crate::interactor::wallet_interactor::WalletInteractor;
use crate::solana::executor::{SwapExecutor, SwapOutcome, SwapStrategy};

#[async_trait]
pub trait SwapInteractor: Send + Sync {
    fn strategy(&self) -> SwapStrategy;

    fn is_busy(&self, chat_id: i64) -> bool;

    /// Run one swap for the chat on behalf of `user_id`. Every failure comes
    /// back as a `SwapResult` with a user-facing message; nothing escapes as
    /// an error.
    async fn execute_swap(&self, chat_id: i64, user_id: u64, request: &SwapRequest) -> SwapResult;
}

pub struct SwapInteractorImpl {
    executor: Arc<dyn SwapExecutor>,
    wallet_interactor: Arc<dyn WalletInteractor>,
    busy: BusyRegistry,
}

impl SwapInteractorImpl {
    pub fn new(
        executor: Arc<dyn SwapExecutor>,
        wallet_interactor: Arc<dyn WalletInteractor>,
        busy: BusyRegistry,
    ) -> Self {
        Self {
            executor,
            wallet_interactor,
            busy,
        }
    }
}

#[async_trait]
impl SwapInteractor for SwapInteractorImpl {
    fn strategy(&self) -> SwapStrategy {
        self.executor.strategy()
    }

    fn is_busy(&self, chat_id: i64) -> bool {
        self.busy.is_busy(chat_id)
    }

    async fn execute_swap(&self, chat_id: i64, user_id: u64, request: &SwapRequest) -> SwapResult {
        if self.wallet_interactor.session(chat_id).connected {
            if let Err(e) = self.wallet_interactor.authorize(user_id) {
                info!("Refusing swap by user {} in chat {}: {}", user_id, chat_id, e);
                return SwapResult::failed(&e);
            }
        }

        let _guard = match self.busy.acquire(chat_id) {
            Ok(guard) => guard,
            Err(e) => {
                info!("Ignoring swap in chat {}: {}", chat_id, e);
                return SwapResult::failed(&e);
            }
        };

        let wallet = self.wallet_interactor.wallet_context(chat_id, user_id);

        info!(
            "Executing {} swap in chat {}: {} {} -> {}",
            self.executor.strategy(),
            chat_id,
            request.amount,
            request.input_mint,
            request.output_mint
        );

        match self.executor.execute(request, &wallet).await {
            Ok(SwapOutcome::DeepLink { url }) => SwapResult::deep_link(url),
            Ok(SwapOutcome::Confirmed { signature }) => SwapResult::confirmed(signature.to_string()),
            Err(e) => {
                error!("Swap failed in chat {}: {}", chat_id, e);
                SwapResult::failed(&e)
            }
        }
    }
}
