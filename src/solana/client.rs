use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use std::sync::Arc;

/// RPC client shared by token lookups, submission and confirmation polling.
///
/// Uses `confirmed` commitment: swaps are reported once the cluster confirms
/// them, without waiting for finalization.
pub fn create_solana_client(rpc_url: &str) -> Arc<RpcClient> {
    Arc::new(RpcClient::new_with_commitment(
        rpc_url.to_string(),
        CommitmentConfig::confirmed(),
    ))
}
