//! JSON-RPC implementation of the ledger boundary

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::ledger::{Finality, Ledger};
use async_trait::async_trait;
use solana_client::{
    client_error::{ClientError as RpcClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{
    account::Account,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use tracing::debug;

/// Ledger backed by a cluster's JSON-RPC endpoint
pub struct RpcLedger {
    client: RpcClient,
}

impl RpcLedger {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(
                config.rpc_url.clone(),
                config.commitment_config(),
            ),
        }
    }

    pub fn from_client(client: RpcClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }
}

#[async_trait(?Send)]
impl Ledger for RpcLedger {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.client.get_latest_blockhash().await.map_err(rpc_error)
    }

    async fn submit(&self, transaction: &Transaction) -> Result<Signature> {
        self.client
            .send_transaction(transaction)
            .await
            .map_err(classify_send_error)
    }

    async fn status(&self, signature: &Signature) -> Result<Finality> {
        let response = self
            .client
            .get_signature_statuses(&[*signature])
            .await
            .map_err(rpc_error)?;

        let status = match response.value.into_iter().next().flatten() {
            Some(status) if status.satisfies_commitment(self.client.commitment()) => status,
            _ => return Ok(Finality::Pending),
        };
        debug!(%signature, slot = status.slot, "signature status observed");

        Ok(match status.err {
            Some(error) => Finality::Failed {
                error: TransactionError::from(error),
                logs: Vec::new(),
            },
            None => Finality::Finalized,
        })
    }

    async fn account(&self, address: &Pubkey) -> Result<Option<Account>> {
        let response = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await
            .map_err(rpc_error)?;
        Ok(response.value)
    }
}

fn rpc_error(error: RpcClientError) -> ClientError {
    ClientError::Rpc(Box::new(error))
}

/// Maps a `sendTransaction` failure onto the client taxonomy.
///
/// Preflight simulation runs the program, so an instruction error found there
/// is reported as a revert together with the simulation log.
fn classify_send_error(error: RpcClientError) -> ClientError {
    let Some(transaction_error) = error.get_transaction_error() else {
        return rpc_error(error);
    };

    let logs = match error.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
            ..
        }) => simulation.logs.clone().unwrap_or_default(),
        _ => Vec::new(),
    };

    ClientError::from_transaction_error(transaction_error, logs)
}
