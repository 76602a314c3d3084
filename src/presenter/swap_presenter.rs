use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use crate::entity::{BotError, Environment, QueryState, SwapPage};
use crate::interactor::query_interactor::{read_swap_request, QuerySource};
use crate::interactor::swap_interactor::SwapInteractor;
use crate::interactor::wallet_interactor::{ConnectOutcome, WalletInteractor};
use crate::solana::executor::SwapStrategy;
use crate::view::page::PageState;
use crate::view::swap_view::SwapView;

#[async_trait]
pub trait SwapPresenter: Send + Sync {
    /// Read a swap link and render its page, replacing `previous`.
    /// Returns the new page when the link is valid.
    async fn open_link(
        &self,
        chat_id: i64,
        source: QuerySource,
        previous: Option<&SwapPage>,
    ) -> Result<Option<SwapPage>>;

    /// Returns the wallet awaiting approval, if the user has to approve one.
    async fn connect_wallet(&self, chat_id: i64, user_id: u64) -> Result<Option<Pubkey>>;

    /// Returns the page the chat is viewing afterwards
    async fn approve_connection(
        &self,
        chat_id: i64,
        user_id: u64,
        page: Option<&SwapPage>,
    ) -> Result<Option<SwapPage>>;

    async fn reject_connection(&self, chat_id: i64, user_id: u64) -> Result<()>;

    /// Returns the page the chat is viewing afterwards
    async fn disconnect_wallet(
        &self,
        chat_id: i64,
        user_id: u64,
        page: Option<&SwapPage>,
    ) -> Result<Option<SwapPage>>;

    async fn show_wallet(&self, chat_id: i64) -> Result<()>;

    /// Swap the request of `page`, pressed from the message `pressed_in`
    async fn swap(
        &self,
        chat_id: i64,
        user_id: u64,
        page: Option<&SwapPage>,
        pressed_in: Option<i32>,
    ) -> Result<()>;
}

pub struct SwapPresenterImpl<V> {
    swap_interactor: Arc<dyn SwapInteractor>,
    wallet_interactor: Arc<dyn WalletInteractor>,
    provider_name: String,
    view: Arc<V>,
}

impl<V> SwapPresenterImpl<V>
where
    V: SwapView,
{
    pub fn new(
        swap_interactor: Arc<dyn SwapInteractor>,
        wallet_interactor: Arc<dyn WalletInteractor>,
        provider_name: impl Into<String>,
        view: Arc<V>,
    ) -> Self {
        Self {
            swap_interactor,
            wallet_interactor,
            provider_name: provider_name.into(),
            view,
        }
    }

    /// Page state for a chat: hydrated with the chat's wallet session
    fn page_state(&self, chat_id: i64, query: QueryState) -> PageState {
        PageState {
            query,
            environment: Environment::Uninitialized.hydrate(self.wallet_interactor.session(chat_id)),
            busy: self.swap_interactor.is_busy(chat_id),
            strategy: self.swap_interactor.strategy(),
        }
    }

    async fn retire(&self, message_id: i32) {
        if let Err(e) = self.view.retire_page(message_id).await {
            warn!("Failed to remove buttons of page {}: {}", message_id, e);
        }
    }

    async fn rerender(&self, chat_id: i64, page: Option<&SwapPage>) -> Result<Option<SwapPage>> {
        match page {
            Some(page) => {
                let state = self.page_state(chat_id, QueryState::Ready(page.request.clone()));
                let message_id = self.view.render_page(&state).await?;
                self.retire(page.message_id).await;
                Ok(Some(SwapPage::new(page.request.clone(), message_id)))
            }
            None => {
                let session = self.wallet_interactor.session(chat_id);
                self.view.display_wallet(&session).await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<V> SwapPresenter for SwapPresenterImpl<V>
where
    V: SwapView + Send + Sync,
{
    async fn open_link(
        &self,
        chat_id: i64,
        source: QuerySource,
        previous: Option<&SwapPage>,
    ) -> Result<Option<SwapPage>> {
        let query = read_swap_request(&source);
        if query == QueryState::Pending {
            self.view.display_usage().await?;
            return Ok(previous.cloned());
        }

        let request = query.request().cloned();
        let state = self.page_state(chat_id, query);
        let message_id = self.view.render_page(&state).await?;

        if let Some(previous) = previous {
            self.retire(previous.message_id).await;
        }

        Ok(request.map(|request| SwapPage::new(request, message_id)))
    }

    async fn connect_wallet(&self, chat_id: i64, user_id: u64) -> Result<Option<Pubkey>> {
        match self.wallet_interactor.connect(chat_id, user_id).await {
            Ok(ConnectOutcome::AwaitingApproval(key)) => {
                self.view
                    .display_connection_prompt(&self.provider_name, &key)
                    .await?;
                Ok(Some(key))
            }
            Ok(ConnectOutcome::AlreadyConnected(key)) => {
                info!("Chat {} already connected to {}", chat_id, key);
                self.view
                    .display_wallet(&self.wallet_interactor.session(chat_id))
                    .await?;
                Ok(None)
            }
            Err(e) => {
                self.view.display_error(&e).await?;
                Ok(None)
            }
        }
    }

    async fn approve_connection(
        &self,
        chat_id: i64,
        user_id: u64,
        page: Option<&SwapPage>,
    ) -> Result<Option<SwapPage>> {
        match self.wallet_interactor.approve(chat_id, user_id) {
            Ok(_) => self.rerender(chat_id, page).await,
            Err(e) => {
                self.view.display_error(&e).await?;
                Ok(page.cloned())
            }
        }
    }

    async fn reject_connection(&self, chat_id: i64, user_id: u64) -> Result<()> {
        let error = self.wallet_interactor.reject(chat_id, user_id);
        self.view.display_error(&error).await
    }

    async fn disconnect_wallet(
        &self,
        chat_id: i64,
        user_id: u64,
        page: Option<&SwapPage>,
    ) -> Result<Option<SwapPage>> {
        match self.wallet_interactor.disconnect(chat_id, user_id) {
            Ok(_) => self.rerender(chat_id, page).await,
            Err(e) => {
                self.view.display_error(&e).await?;
                Ok(page.cloned())
            }
        }
    }

    async fn show_wallet(&self, chat_id: i64) -> Result<()> {
        let session = self.wallet_interactor.session(chat_id);
        self.view.display_wallet(&session).await
    }

    async fn swap(
        &self,
        chat_id: i64,
        user_id: u64,
        page: Option<&SwapPage>,
        pressed_in: Option<i32>,
    ) -> Result<()> {
        let page = match page {
            Some(page) => page,
            None => return self.view.display_error(&BotError::MissingParameters).await,
        };

        if !page.is_shown_in(pressed_in) {
            info!(
                "Swap pressed on a replaced page in chat {} (current page {})",
                chat_id, page.message_id
            );
            if let Some(stale) = pressed_in {
                self.retire(stale).await;
            }
            return self.view.display_error(&BotError::StalePage).await;
        }

        if self.swap_interactor.is_busy(chat_id) {
            return self
                .view
                .display_error(&BotError::OperationInProgress)
                .await;
        }

        let request = &page.request;
        let message = match self.swap_interactor.strategy() {
            SwapStrategy::Transactional => self.view.display_processing(request).await?,
            SwapStrategy::DeepLink => None,
        };

        let result = self
            .swap_interactor
            .execute_swap(chat_id, user_id, request)
            .await;

        self.view.display_swap_result(&result, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{SwapRequest, SwapResult, WalletSession, USAGE_HINT};
    use crate::interactor::busy_guard::BusyRegistry;
    use crate::interactor::swap_interactor::SwapInteractorImpl;
    use crate::interactor::wallet_interactor::WalletInteractorImpl;
    use crate::solana::executor::DeepLinkExecutor;
    use crate::solana::wallet::{KeypairWalletProvider, WalletProvider};
    use solana_sdk::signature::Keypair;
    use std::sync::Mutex;
    use teloxide::types::Message;

    const OWNER: u64 = 10;
    const STRANGER: u64 = 987654321;

    #[derive(Debug, Clone, PartialEq)]
    enum ViewEvent {
        Usage,
        Page(i32, PageState),
        Retired(i32),
        Prompt(Pubkey),
        Wallet(WalletSession),
        Processing,
        Result(SwapResult),
        Error(String),
    }

    #[derive(Default)]
    struct RecordingView {
        events: Mutex<Vec<ViewEvent>>,
        next_message_id: Mutex<i32>,
    }

    impl RecordingView {
        fn record(&self, event: ViewEvent) -> Result<()> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }

        fn last(&self) -> ViewEvent {
            self.events.lock().unwrap().last().cloned().unwrap()
        }

        fn events(&self) -> Vec<ViewEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SwapView for RecordingView {
        async fn display_usage(&self) -> Result<()> {
            self.record(ViewEvent::Usage)
        }

        async fn render_page(&self, page: &PageState) -> Result<i32> {
            let message_id = {
                let mut next = self.next_message_id.lock().unwrap();
                *next += 1;
                *next
            };
            self.record(ViewEvent::Page(message_id, page.clone()))?;
            Ok(message_id)
        }

        async fn retire_page(&self, message_id: i32) -> Result<()> {
            self.record(ViewEvent::Retired(message_id))
        }

        async fn display_connection_prompt(&self, _name: &str, wallet: &Pubkey) -> Result<()> {
            self.record(ViewEvent::Prompt(*wallet))
        }

        async fn display_wallet(&self, session: &WalletSession) -> Result<()> {
            self.record(ViewEvent::Wallet(*session))
        }

        async fn display_processing(&self, _request: &SwapRequest) -> Result<Option<Message>> {
            self.record(ViewEvent::Processing)?;
            Ok(None)
        }

        async fn display_swap_result(
            &self,
            result: &SwapResult,
            _message: Option<Message>,
        ) -> Result<()> {
            self.record(ViewEvent::Result(result.clone()))
        }

        async fn display_error(&self, error: &BotError) -> Result<()> {
            self.record(ViewEvent::Error(error.to_string()))
        }
    }

    fn presenter(
        provider: Option<Arc<dyn WalletProvider>>,
    ) -> (SwapPresenterImpl<RecordingView>, Arc<RecordingView>) {
        let wallets: Arc<dyn WalletInteractor> = Arc::new(WalletInteractorImpl::new(provider));
        let swaps: Arc<dyn SwapInteractor> = Arc::new(SwapInteractorImpl::new(
            Arc::new(DeepLinkExecutor::new("https://jup.ag/swap")),
            wallets.clone(),
            BusyRegistry::new(),
        ));
        let view = Arc::new(RecordingView::default());
        (
            SwapPresenterImpl::new(swaps, wallets, "Local keypair", view.clone()),
            view,
        )
    }

    fn keypair_provider() -> Option<Arc<dyn WalletProvider>> {
        Some(Arc::new(KeypairWalletProvider::new(Keypair::new(), OWNER)))
    }

    fn link(amount: &str) -> QuerySource {
        QuerySource::Text(format!(
            "https://swap.example/?input=A&output=B&amount={}",
            amount
        ))
    }

    /// Open a link and connect the owner's wallet; returns the live page
    async fn connected_page(presenter: &SwapPresenterImpl<RecordingView>, amount: &str) -> SwapPage {
        let page = presenter.open_link(1, link(amount), None).await.unwrap().unwrap();
        presenter.connect_wallet(1, OWNER).await.unwrap().unwrap();
        presenter
            .approve_connection(1, OWNER, Some(&page))
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn incomplete_link_renders_the_error_without_actions() {
        let (presenter, view) = presenter(keypair_provider());

        let page = presenter
            .open_link(1, QuerySource::Text("?input=A&amount=5".to_string()), None)
            .await
            .unwrap();

        assert!(page.is_none());
        match view.last() {
            ViewEvent::Page(_, page) => {
                assert_eq!(page.query, QueryState::Invalid(USAGE_HINT.to_string()));
                assert!(!page.affordances().any());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn unresolved_source_shows_usage_instead_of_an_error() {
        let (presenter, view) = presenter(keypair_provider());

        presenter
            .open_link(1, QuerySource::Unresolved, None)
            .await
            .unwrap();

        assert_eq!(view.last(), ViewEvent::Usage);
    }

    #[tokio::test]
    async fn full_flow_ends_with_a_deep_link() {
        let (presenter, view) = presenter(keypair_provider());

        let page = presenter.open_link(1, link("5"), None).await.unwrap().unwrap();
        match view.last() {
            ViewEvent::Page(id, state) => {
                assert_eq!(id, page.message_id);
                assert!(state.affordances().connect);
            }
            other => panic!("unexpected {:?}", other),
        }

        let key = presenter.connect_wallet(1, OWNER).await.unwrap().unwrap();
        assert_eq!(view.last(), ViewEvent::Prompt(key));

        let page = presenter
            .approve_connection(1, OWNER, Some(&page))
            .await
            .unwrap()
            .unwrap();
        match view.last() {
            ViewEvent::Retired(_) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(view.events().iter().any(|event| matches!(
            event,
            ViewEvent::Page(id, state) if *id == page.message_id
                && state.affordances().swap
                && state.environment.wallet().account() == Some(key)
        )));

        presenter
            .swap(1, OWNER, Some(&page), Some(page.message_id))
            .await
            .unwrap();
        assert_eq!(
            view.last(),
            ViewEvent::Result(SwapResult::deep_link(
                "https://jup.ag/swap?inputMint=A&outputMint=B&amount=5".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn swap_on_a_replaced_page_does_not_run_the_newer_request() {
        let (presenter, view) = presenter(keypair_provider());
        let small = connected_page(&presenter, "0.1").await;

        let large = presenter
            .open_link(1, link("100"), Some(&small))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.last(), ViewEvent::Retired(small.message_id));

        presenter
            .swap(1, OWNER, Some(&large), Some(small.message_id))
            .await
            .unwrap();

        assert_eq!(view.last(), ViewEvent::Error(BotError::StalePage.to_string()));
        assert!(!view
            .events()
            .iter()
            .any(|event| matches!(event, ViewEvent::Result(_))));

        presenter
            .swap(1, OWNER, Some(&large), Some(large.message_id))
            .await
            .unwrap();
        assert_eq!(
            view.last(),
            ViewEvent::Result(SwapResult::deep_link(
                "https://jup.ag/swap?inputMint=A&outputMint=B&amount=100".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn other_users_cannot_approve_or_swap() {
        let (presenter, view) = presenter(keypair_provider());
        let page = presenter.open_link(1, link("5"), None).await.unwrap().unwrap();
        presenter.connect_wallet(1, OWNER).await.unwrap();

        let unchanged = presenter
            .approve_connection(1, STRANGER, Some(&page))
            .await
            .unwrap();
        assert_eq!(unchanged, Some(page.clone()));
        assert_eq!(view.last(), ViewEvent::Error(BotError::NotWalletOwner.to_string()));

        let page = presenter
            .approve_connection(1, OWNER, Some(&page))
            .await
            .unwrap()
            .unwrap();
        presenter
            .swap(1, STRANGER, Some(&page), Some(page.message_id))
            .await
            .unwrap();

        match view.last() {
            ViewEvent::Result(result) => {
                assert!(!result.success());
                assert_eq!(
                    result.error_message,
                    Some(BotError::NotWalletOwner.to_string())
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejected_connection_shows_the_rejection() {
        let (presenter, view) = presenter(keypair_provider());
        presenter.connect_wallet(1, OWNER).await.unwrap();

        presenter.reject_connection(1, OWNER).await.unwrap();

        assert_eq!(
            view.last(),
            ViewEvent::Error(BotError::ConnectionRejected.to_string())
        );
    }

    #[tokio::test]
    async fn missing_provider_is_reported() {
        let (presenter, view) = presenter(None);

        assert!(presenter.connect_wallet(1, OWNER).await.unwrap().is_none());
        assert_eq!(
            view.last(),
            ViewEvent::Error(BotError::ProviderNotFound.to_string())
        );
    }

    #[tokio::test]
    async fn swap_without_request_is_a_parameter_error() {
        let (presenter, view) = presenter(keypair_provider());

        presenter.swap(1, OWNER, None, Some(7)).await.unwrap();

        assert_eq!(view.last(), ViewEvent::Error(USAGE_HINT.to_string()));
    }
}
