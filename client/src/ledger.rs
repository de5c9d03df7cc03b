//! Ledger boundary used by the submission client

use crate::error::Result;
use async_trait::async_trait;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::{Transaction, TransactionError},
};
use std::sync::Arc;

/// Status of a submitted transaction as reported by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finality {
    /// Not yet observed at the requested commitment
    Pending,
    /// Executed successfully and final at the requested commitment
    Finalized,
    /// Executed and failed; nothing it wrote was kept
    Failed {
        error: TransactionError,
        logs: Vec<String>,
    },
}

/// Operations the client needs from a cluster
///
/// `submit` performs the ledger's admission step only. Implementations return
/// `SubmissionRejected` when the transaction never reaches execution and may
/// return `ExecutionReverted` when admission includes a simulated run that
/// failed inside the program.
#[async_trait(?Send)]
pub trait Ledger {
    async fn latest_blockhash(&self) -> Result<Hash>;

    async fn submit(&self, transaction: &Transaction) -> Result<Signature>;

    async fn status(&self, signature: &Signature) -> Result<Finality>;

    async fn account(&self, address: &Pubkey) -> Result<Option<Account>>;
}

#[async_trait(?Send)]
impl<L: Ledger + ?Sized> Ledger for Arc<L> {
    async fn latest_blockhash(&self) -> Result<Hash> {
        (**self).latest_blockhash().await
    }

    async fn submit(&self, transaction: &Transaction) -> Result<Signature> {
        (**self).submit(transaction).await
    }

    async fn status(&self, signature: &Signature) -> Result<Finality> {
        (**self).status(signature).await
    }

    async fn account(&self, address: &Pubkey) -> Result<Option<Account>> {
        (**self).account(address).await
    }
}
