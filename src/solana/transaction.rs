use async_trait::async_trait;
use log::{debug, info, warn};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::entity::BotError;

/// Network connection a wallet submits signed transactions through
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Submit an already signed transaction
    async fn send(&self, transaction: &VersionedTransaction) -> Result<Signature, BotError>;

    /// Wait until the transaction is confirmed, failed, or the timeout elapses
    async fn confirm(&self, signature: &Signature) -> Result<(), BotError>;
}

/// RPC-backed sender that polls signature status for confirmation
pub struct RpcTransactionSender {
    client: Arc<RpcClient>,
    timeout: Duration,
    poll_interval: Duration,
}

impl RpcTransactionSender {
    pub fn new(client: Arc<RpcClient>, timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            client,
            timeout,
            poll_interval,
        }
    }
}

#[async_trait]
impl TransactionSender for RpcTransactionSender {
    async fn send(&self, transaction: &VersionedTransaction) -> Result<Signature, BotError> {
        info!("Sending transaction to the network");

        self.client
            .send_transaction(transaction)
            .await
            .map_err(|e| BotError::SubmissionRejected(e.to_string()))
    }

    async fn confirm(&self, signature: &Signature) -> Result<(), BotError> {
        let deadline = Instant::now() + self.timeout;

        loop {
            match self.client.get_signature_status(signature).await {
                Ok(Some(Ok(()))) => {
                    info!("Transaction {} confirmed", signature);
                    return Ok(());
                }
                Ok(Some(Err(e))) => return Err(BotError::TransactionFailed(e.to_string())),
                Ok(None) => debug!("Transaction {} not confirmed yet", signature),
                // A flaky RPC read is not a verdict on the transaction
                Err(e) => warn!("Failed to get status of {}: {}", signature, e),
            }

            if Instant::now() >= deadline {
                return Err(BotError::ConfirmationTimeout {
                    signature: signature.to_string(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
