use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::sync::Arc;

use teloxide::{types::ChatId, Bot};

use crate::config::{AppConfig, WalletConfig};
use crate::interactor::busy_guard::BusyRegistry;
use crate::interactor::swap_interactor::{SwapInteractor, SwapInteractorImpl};
use crate::interactor::wallet_interactor::{WalletInteractor, WalletInteractorImpl};
use crate::presenter::swap_presenter::SwapPresenterImpl;
use crate::solana::client::create_solana_client;
use crate::solana::executor::{DeepLinkExecutor, SwapExecutor, SwapStrategy, TransactionalExecutor};
use crate::solana::jupiter::{
    JupiterQuoteService, JupiterSwapService, JupiterTokenRepository, QuoteService, SwapService,
    TokenRepository,
};
use crate::solana::transaction::{RpcTransactionSender, TransactionSender};
use crate::solana::wallet::{
    keypair_from_base58, keypair_from_file, KeypairWalletProvider, WalletProvider,
};
use crate::utils::Explorer;
use crate::view::swap_view::TelegramSwapView;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    wallet_interactor: Arc<dyn WalletInteractor>,
    swap_interactor: Arc<dyn SwapInteractor>,

    provider_name: String,
    explorer: Explorer,
}

impl ServiceContainer {
    /// Wire every service from the loaded configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        info!("Connecting to Solana RPC at {}", config.solana_rpc_url);
        let solana_client = create_solana_client(&config.solana_rpc_url);

        let provider = load_wallet_provider(&config.wallet)?;
        let provider_name = provider
            .as_ref()
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| "wallet".to_string());

        let wallet_interactor =
            Arc::new(WalletInteractorImpl::new(provider)) as Arc<dyn WalletInteractor>;

        let executor: Arc<dyn SwapExecutor> = match config.swap_strategy {
            SwapStrategy::DeepLink => {
                Arc::new(DeepLinkExecutor::new(config.jupiter.swap_page_url.clone()))
            }
            SwapStrategy::Transactional => {
                let token_repository = Arc::new(JupiterTokenRepository::new(
                    &config.jupiter,
                    solana_client.clone(),
                )) as Arc<dyn TokenRepository>;
                let quote_service =
                    Arc::new(JupiterQuoteService::new(&config.jupiter)) as Arc<dyn QuoteService>;
                let swap_service =
                    Arc::new(JupiterSwapService::new(&config.jupiter)) as Arc<dyn SwapService>;
                let connection = Arc::new(RpcTransactionSender::new(
                    solana_client.clone(),
                    config.confirmation.timeout(),
                    config.confirmation.poll_interval(),
                )) as Arc<dyn TransactionSender>;

                Arc::new(TransactionalExecutor::new(
                    token_repository,
                    quote_service,
                    swap_service,
                    connection,
                    config.jupiter.slippage_bps,
                ))
            }
        };
        info!("Swap strategy: {}", executor.strategy());

        let swap_interactor = Arc::new(SwapInteractorImpl::new(
            executor,
            wallet_interactor.clone(),
            BusyRegistry::new(),
        )) as Arc<dyn SwapInteractor>;

        let explorer = Explorer::new(config.explorer_url.clone(), config.cluster.clone());

        Ok(Self {
            wallet_interactor,
            swap_interactor,
            provider_name,
            explorer,
        })
    }

    pub fn strategy(&self) -> SwapStrategy {
        self.swap_interactor.strategy()
    }

    /// Presenter bound to a single chat
    pub fn swap_presenter(&self, bot: Bot, chat_id: ChatId) -> SwapPresenterImpl<TelegramSwapView> {
        let view = Arc::new(TelegramSwapView::new(bot, chat_id, self.explorer.clone()));
        SwapPresenterImpl::new(
            self.swap_interactor.clone(),
            self.wallet_interactor.clone(),
            self.provider_name.clone(),
            view,
        )
    }
}

/// Keypair file first, then the base58 secret. No wallet at all is allowed:
/// the bot still renders links, connecting just fails with "no wallet found".
/// A configured wallet must name its Telegram owner.
fn load_wallet_provider(config: &WalletConfig) -> Result<Option<Arc<dyn WalletProvider>>> {
    let keypair = if let Some(path) = &config.keypair_path {
        Some(keypair_from_file(path).with_context(|| format!("Failed to load keypair from {}", path))?)
    } else if let Some(secret) = &config.keypair_base58 {
        Some(keypair_from_base58(secret).context("Failed to decode WALLET__KEYPAIR_BASE58")?)
    } else {
        None
    };

    match keypair {
        Some(keypair) => {
            let owner_id = config.owner_id.ok_or_else(|| {
                anyhow!("WALLET__OWNER_ID must be set when a wallet keypair is configured")
            })?;
            let provider = KeypairWalletProvider::new(keypair, owner_id);
            info!("Loaded wallet {} for user {}", provider.pubkey(), owner_id);
            Ok(Some(Arc::new(provider)))
        }
        None => {
            warn!("No wallet configured; connecting a wallet will fail");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{Keypair, Signer};

    fn base58(keypair: &Keypair) -> String {
        bs58::encode(keypair.to_bytes()).into_string()
    }

    #[test]
    fn no_wallet_configured_is_not_an_error() {
        let provider = load_wallet_provider(&WalletConfig::default()).unwrap();
        assert!(provider.is_none());
    }

    #[tokio::test]
    async fn base58_secret_becomes_the_provider() {
        let keypair = Keypair::new();
        let config = WalletConfig {
            keypair_base58: Some(base58(&keypair)),
            owner_id: Some(42),
            ..WalletConfig::default()
        };

        let provider = load_wallet_provider(&config).unwrap().unwrap();
        assert_eq!(provider.connect().await.unwrap(), keypair.pubkey());
        assert!(provider.is_available_to(42));
        assert!(!provider.is_available_to(7));
    }

    #[test]
    fn wallet_without_owner_fails_startup() {
        let config = WalletConfig {
            keypair_base58: Some(base58(&Keypair::new())),
            owner_id: None,
            ..WalletConfig::default()
        };

        let err = load_wallet_provider(&config).err().unwrap();
        assert!(err.to_string().contains("WALLET__OWNER_ID"));
    }

    #[test]
    fn bad_secret_fails_startup() {
        let config = WalletConfig {
            keypair_base58: Some("not-base58-0OIl".to_string()),
            owner_id: Some(42),
            ..WalletConfig::default()
        };
        assert!(load_wallet_provider(&config).is_err());
    }
}
