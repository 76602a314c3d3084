use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::info;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::VersionedTransaction,
};
use std::str::FromStr;

use crate::entity::BotError;
use crate::solana::transaction::TransactionSender;

/// Wallet the bot can connect and ask to sign.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this wallet may be connected by the given Telegram user
    fn is_available_to(&self, user_id: u64) -> bool;

    async fn connect(&self) -> Result<Pubkey, BotError>;

    /// Sign the transaction and submit it through `connection`
    async fn send_transaction(
        &self,
        transaction: VersionedTransaction,
        connection: &dyn TransactionSender,
    ) -> Result<Signature, BotError>;
}

/// Wallet backed by a local keypair, usable only by its Telegram owner
pub struct KeypairWalletProvider {
    keypair: Keypair,
    owner_id: u64,
}

impl KeypairWalletProvider {
    pub fn new(keypair: Keypair, owner_id: u64) -> Self {
        Self { keypair, owner_id }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl WalletProvider for KeypairWalletProvider {
    fn name(&self) -> &str {
        "Local keypair"
    }

    fn is_available_to(&self, user_id: u64) -> bool {
        self.owner_id == user_id
    }

    async fn connect(&self) -> Result<Pubkey, BotError> {
        Ok(self.keypair.pubkey())
    }

    async fn send_transaction(
        &self,
        transaction: VersionedTransaction,
        connection: &dyn TransactionSender,
    ) -> Result<Signature, BotError> {
        let fee_payer = transaction.message.static_account_keys().first().copied();
        if fee_payer != Some(self.keypair.pubkey()) {
            return Err(BotError::WalletMismatch);
        }

        // Sign the transaction
        let signed = VersionedTransaction::try_new(transaction.message, &[&self.keypair])
            .map_err(|e| BotError::SubmissionRejected(format!("signing failed: {}", e)))?;

        info!("Transaction signed by {}", self.keypair.pubkey());

        connection.send(&signed).await
    }
}

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58.trim())
        .into_vec()
        .map_err(|e| anyhow!("Failed to decode base58 keypair: {}", e))?;

    keypair_from_bytes(&keypair_bytes)
}

/// Read a Solana CLI keypair file (a JSON array of 64 bytes).
pub fn keypair_from_file(path: &str) -> Result<Keypair> {
    let path = expand_home(path);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read keypair file {}", path))?;
    let keypair_bytes: Vec<u8> = serde_json::from_str(&contents)
        .with_context(|| format!("Keypair file {} is not a JSON byte array", path))?;

    keypair_from_bytes(&keypair_bytes)
}

fn keypair_from_bytes(keypair_bytes: &[u8]) -> Result<Keypair> {
    if keypair_bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: {}", keypair_bytes.len()));
    }

    Keypair::from_bytes(keypair_bytes)
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => format!("{}/{}", home, rest),
        _ => path.to_string(),
    }
}

/// Convert base58 string to Solana `Pubkey`.
pub fn parse_pubkey(address: &str) -> Result<Pubkey, BotError> {
    Pubkey::from_str(address.trim()).map_err(|_| BotError::InvalidMint(address.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::hash::Hash;
    use solana_sdk::message::{v0, VersionedMessage};
    use solana_sdk::system_instruction;
    use std::sync::Mutex;

    struct CapturingSender {
        sent: Mutex<Vec<VersionedTransaction>>,
    }

    #[async_trait]
    impl TransactionSender for CapturingSender {
        async fn send(&self, transaction: &VersionedTransaction) -> Result<Signature, BotError> {
            self.sent.lock().unwrap().push(transaction.clone());
            Ok(transaction.signatures[0])
        }

        async fn confirm(&self, _signature: &Signature) -> Result<(), BotError> {
            Ok(())
        }
    }

    fn unsigned_transfer(payer: &Pubkey) -> VersionedTransaction {
        let ix = system_instruction::transfer(payer, &Pubkey::new_unique(), 1);
        let message = v0::Message::try_compile(payer, &[ix], &[], Hash::default()).unwrap();
        VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::V0(message),
        }
    }

    #[test]
    fn base58_keypair_round_trips() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let restored = keypair_from_base58(&encoded).unwrap();
        assert_eq!(restored.pubkey(), keypair.pubkey());
        assert!(keypair_from_base58("not-base58!").is_err());
    }

    #[test]
    fn only_the_owner_can_use_the_wallet() {
        let owned = KeypairWalletProvider::new(Keypair::new(), 7);

        assert!(owned.is_available_to(7));
        assert!(!owned.is_available_to(8));
    }

    #[tokio::test]
    async fn signs_before_submitting() {
        let keypair = Keypair::new();
        let payer = keypair.pubkey();
        let provider = KeypairWalletProvider::new(keypair, 1);
        let sender = CapturingSender {
            sent: Mutex::new(Vec::new()),
        };

        let signature = provider
            .send_transaction(unsigned_transfer(&payer), &sender)
            .await
            .unwrap();

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_ne!(signature, Signature::default());
        assert!(sent[0].verify_with_results().iter().all(|ok| *ok));
    }

    #[tokio::test]
    async fn refuses_transactions_for_another_payer() {
        let provider = KeypairWalletProvider::new(Keypair::new(), 1);
        let sender = CapturingSender {
            sent: Mutex::new(Vec::new()),
        };

        let result = provider
            .send_transaction(unsigned_transfer(&Pubkey::new_unique()), &sender)
            .await;

        assert!(matches!(result, Err(BotError::WalletMismatch)));
        assert!(sender.sent.lock().unwrap().is_empty());
    }
}
