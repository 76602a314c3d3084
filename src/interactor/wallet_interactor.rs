use async_trait::async_trait;
use log::{info, warn};
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::entity::{BotError, WalletSession};
use crate::solana::executor::WalletContext;
use crate::solana::wallet::WalletProvider;

/// Result of pressing "Connect wallet"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Nothing to do, the chat already has this wallet connected
    AlreadyConnected(Pubkey),
    /// The provider answered; the user still has to approve
    AwaitingApproval(Pubkey),
}

#[async_trait]
pub trait WalletInteractor: Send + Sync {
    fn session(&self, chat_id: i64) -> WalletSession;

    /// Whether `user_id` may act on the configured wallet
    fn authorize(&self, user_id: u64) -> Result<(), BotError>;

    async fn connect(&self, chat_id: i64, user_id: u64) -> Result<ConnectOutcome, BotError>;

    fn approve(&self, chat_id: i64, user_id: u64) -> Result<WalletSession, BotError>;

    fn reject(&self, chat_id: i64, user_id: u64) -> BotError;

    fn disconnect(&self, chat_id: i64, user_id: u64) -> Result<WalletSession, BotError>;

    /// Session and provider, ready to be injected into an executor. The
    /// provider is only handed out to its owner.
    fn wallet_context(&self, chat_id: i64, user_id: u64) -> WalletContext;
}

#[derive(Debug, Clone, Copy)]
enum Connection {
    Pending(Pubkey),
    Connected(Pubkey),
}

pub struct WalletInteractorImpl {
    provider: Option<Arc<dyn WalletProvider>>,
    connections: Mutex<HashMap<i64, Connection>>,
}

impl WalletInteractorImpl {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            provider,
            connections: Mutex::new(HashMap::new()),
        }
    }

    fn with_connections<R>(&self, f: impl FnOnce(&mut HashMap<i64, Connection>) -> R) -> R {
        match self.connections.lock() {
            Ok(mut connections) => f(&mut connections),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl WalletInteractor for WalletInteractorImpl {
    fn session(&self, chat_id: i64) -> WalletSession {
        self.with_connections(|connections| match connections.get(&chat_id) {
            Some(Connection::Connected(key)) => WalletSession::connected(*key),
            _ => WalletSession::disconnected(),
        })
    }

    fn authorize(&self, user_id: u64) -> Result<(), BotError> {
        match &self.provider {
            Some(provider) if provider.is_available_to(user_id) => Ok(()),
            Some(_) => {
                warn!("User {} is not the owner of the configured wallet", user_id);
                Err(BotError::NotWalletOwner)
            }
            None => Err(BotError::ProviderNotFound),
        }
    }

    async fn connect(&self, chat_id: i64, user_id: u64) -> Result<ConnectOutcome, BotError> {
        let provider = match (&self.provider, self.authorize(user_id)) {
            (Some(provider), Ok(())) => provider,
            // Strangers are not told that a wallet exists
            _ => return Err(BotError::ProviderNotFound),
        };

        if let Some(key) = self.session(chat_id).account() {
            return Ok(ConnectOutcome::AlreadyConnected(key));
        }

        let key = provider.connect().await?;
        info!(
            "Wallet {} ({}) offered to chat {}",
            key,
            provider.name(),
            chat_id
        );

        self.with_connections(|connections| {
            connections.insert(chat_id, Connection::Pending(key));
        });

        Ok(ConnectOutcome::AwaitingApproval(key))
    }

    fn approve(&self, chat_id: i64, user_id: u64) -> Result<WalletSession, BotError> {
        self.authorize(user_id)?;

        self.with_connections(|connections| match connections.get(&chat_id).copied() {
            Some(Connection::Pending(key)) | Some(Connection::Connected(key)) => {
                connections.insert(chat_id, Connection::Connected(key));
                info!("Wallet {} connected in chat {}", key, chat_id);
                Ok(WalletSession::connected(key))
            }
            None => Err(BotError::WalletNotConnected),
        })
    }

    fn reject(&self, chat_id: i64, user_id: u64) -> BotError {
        if let Err(e) = self.authorize(user_id) {
            return e;
        }

        self.with_connections(|connections| {
            if let Some(Connection::Pending(_)) = connections.get(&chat_id) {
                connections.remove(&chat_id);
            }
        });
        info!("Wallet connection rejected in chat {}", chat_id);
        BotError::ConnectionRejected
    }

    fn disconnect(&self, chat_id: i64, user_id: u64) -> Result<WalletSession, BotError> {
        self.authorize(user_id)?;

        self.with_connections(|connections| connections.remove(&chat_id));
        info!("Wallet disconnected in chat {}", chat_id);
        Ok(WalletSession::disconnected())
    }

    fn wallet_context(&self, chat_id: i64, user_id: u64) -> WalletContext {
        let session = self.session(chat_id);
        if !session.connected || self.authorize(user_id).is_err() {
            return WalletContext {
                session,
                provider: None,
            };
        }

        WalletContext {
            session,
            provider: self.provider.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::wallet::KeypairWalletProvider;
    use solana_sdk::signature::Keypair;
    use solana_sdk::signer::Signer;

    const OWNER: u64 = 10;
    const STRANGER: u64 = 987654321;

    fn interactor() -> (WalletInteractorImpl, Pubkey) {
        let keypair = Keypair::new();
        let key = keypair.pubkey();
        let provider: Arc<dyn WalletProvider> = Arc::new(KeypairWalletProvider::new(keypair, OWNER));
        (WalletInteractorImpl::new(Some(provider)), key)
    }

    #[tokio::test]
    async fn connect_then_approve() {
        let (wallets, key) = interactor();

        assert_eq!(
            wallets.connect(1, OWNER).await.unwrap(),
            ConnectOutcome::AwaitingApproval(key)
        );
        // pending is not connected
        assert!(!wallets.session(1).connected);
        assert!(wallets.wallet_context(1, OWNER).provider.is_none());

        let session = wallets.approve(1, OWNER).unwrap();
        assert_eq!(session.account(), Some(key));
        assert!(wallets.wallet_context(1, OWNER).provider.is_some());
    }

    #[tokio::test]
    async fn connect_is_idempotent_once_connected() {
        let (wallets, key) = interactor();
        wallets.connect(1, OWNER).await.unwrap();
        wallets.approve(1, OWNER).unwrap();

        assert_eq!(
            wallets.connect(1, OWNER).await.unwrap(),
            ConnectOutcome::AlreadyConnected(key)
        );
        assert!(wallets.session(1).connected);
    }

    #[tokio::test]
    async fn rejection_clears_the_pending_connection() {
        let (wallets, _) = interactor();
        wallets.connect(1, OWNER).await.unwrap();

        let err = wallets.reject(1, OWNER);
        assert!(matches!(err, BotError::ConnectionRejected));
        assert!(matches!(wallets.approve(1, OWNER), Err(BotError::WalletNotConnected)));
    }

    #[tokio::test]
    async fn missing_or_foreign_provider_is_not_found() {
        let none = WalletInteractorImpl::new(None);
        assert!(matches!(none.connect(1, OWNER).await, Err(BotError::ProviderNotFound)));

        let (owned, _) = interactor();
        assert!(matches!(owned.connect(1, STRANGER).await, Err(BotError::ProviderNotFound)));
        assert!(owned.connect(1, OWNER).await.is_ok());
    }

    #[tokio::test]
    async fn strangers_cannot_use_the_owners_connection() {
        let (wallets, _) = interactor();
        wallets.connect(555, OWNER).await.unwrap();

        assert!(matches!(wallets.approve(555, STRANGER), Err(BotError::NotWalletOwner)));
        assert!(!wallets.session(555).connected);

        wallets.approve(555, OWNER).unwrap();
        assert!(wallets.wallet_context(555, STRANGER).provider.is_none());
        assert!(matches!(wallets.reject(555, STRANGER), BotError::NotWalletOwner));
        assert!(matches!(wallets.disconnect(555, STRANGER), Err(BotError::NotWalletOwner)));
        assert!(wallets.session(555).connected);
        assert!(wallets.wallet_context(555, OWNER).provider.is_some());
    }

    #[tokio::test]
    async fn sessions_are_per_chat() {
        let (wallets, _) = interactor();
        wallets.connect(1, OWNER).await.unwrap();
        wallets.approve(1, OWNER).unwrap();

        assert!(wallets.session(1).connected);
        assert!(!wallets.session(2).connected);

        wallets.disconnect(1, OWNER).unwrap();
        assert!(!wallets.session(1).connected);
    }
}
