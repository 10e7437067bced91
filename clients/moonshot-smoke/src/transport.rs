//! RPC seam between the program handle and the network.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use tracing::debug;

use crate::{context::ConnectionContext, errors::TransportError};

/// The RPC calls a smoke run needs. `send_and_confirm` is the only one that
/// changes chain state.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash, TransportError>;

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError>;

    /// Submit a signed transaction and wait until the cluster confirms it
    async fn send_and_confirm(&self, transaction: &Transaction)
        -> Result<Signature, TransportError>;
}

#[async_trait]
impl RpcTransport for RpcClient {
    async fn latest_blockhash(&self) -> Result<Hash, TransportError> {
        Ok(self.get_latest_blockhash().await?)
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await?;
        Ok(response.value)
    }

    async fn send_and_confirm(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, TransportError> {
        debug!(url = %self.url(), "sending transaction");
        Ok(self.send_and_confirm_transaction(transaction).await?)
    }
}

/// Opens a transport for a connection context
pub trait Connector {
    type Transport: RpcTransport;

    fn connect(&self, context: &ConnectionContext) -> Self::Transport;
}

/// Connects through the nonblocking JSON-RPC client
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcConnector;

impl Connector for RpcConnector {
    type Transport = RpcClient;

    fn connect(&self, context: &ConnectionContext) -> RpcClient {
        RpcClient::new_with_commitment(context.cluster().url().to_string(), context.commitment())
    }
}
