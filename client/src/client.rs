//! Builds, signs, submits and confirms `initialize` calls

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::instruction::{find_state_address, InitializeCall};
use crate::ledger::{Finality, Ledger};
use crate::state::StateView;
use solana_sdk::{
    message::Message,
    signature::Signature,
    signer::Signer,
    transaction::Transaction,
};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// Transaction submission client for the Penguin Finance program
///
/// Each call suspends until the ledger reports a final outcome or the configured
/// confirmation window runs out. The client never resubmits on its own: a
/// `ConfirmationTimeout` is retried with `confirm` on the same signature.
pub struct SubmissionClient<L> {
    ledger: L,
    config: ClientConfig,
}

impl<L: Ledger> SubmissionClient<L> {
    pub fn new(ledger: L, config: ClientConfig) -> Self {
        Self { ledger, config }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Bootstraps the protocol state with `signer` as authority
    pub async fn initialize(&self, signer: &dyn Signer) -> Result<Signature> {
        let call = InitializeCall::new(self.config.program_id, signer.pubkey());
        self.submit_and_confirm(&call, signer).await
    }

    /// Signs `call` with `signer` as fee payer, submits it and waits for finality
    pub async fn submit_and_confirm(
        &self,
        call: &InitializeCall,
        signer: &dyn Signer,
    ) -> Result<Signature> {
        let transaction = self.build_transaction(call, signer).await?;

        let signature = match self.ledger.submit(&transaction).await {
            Ok(signature) => signature,
            Err(error) => {
                warn!(authority = %call.authority, %error, "initialize submission failed");
                return Err(error);
            }
        };
        info!(%signature, state = %call.state, "initialize submitted");

        self.confirm(&signature).await
    }

    /// Waits for an already submitted transaction to reach finality.
    ///
    /// Only queries status, so it is safe to call again after a timeout.
    pub async fn confirm(&self, signature: &Signature) -> Result<Signature> {
        let timeout = self.config.confirmation_timeout();
        let poll_interval = self.config.poll_interval();
        let started = Instant::now();

        loop {
            match self.ledger.status(signature).await? {
                Finality::Finalized => {
                    info!(%signature, "transaction confirmed");
                    return Ok(*signature);
                }
                Finality::Failed { error, logs } => {
                    let error = ClientError::from_transaction_error(error, logs);
                    warn!(%signature, %error, "transaction failed");
                    return Err(error);
                }
                Finality::Pending => {}
            }

            let waited = started.elapsed();
            if waited >= timeout {
                warn!(%signature, ?waited, "confirmation window elapsed");
                return Err(ClientError::ConfirmationTimeout {
                    signature: *signature,
                    waited,
                });
            }
            debug!(%signature, ?waited, "transaction pending");
            sleep(poll_interval.min(timeout - waited)).await;
        }
    }

    /// Reads the canonical state account
    pub async fn fetch_state(&self) -> Result<StateView> {
        let (address, _) = find_state_address(&self.config.program_id);
        let account = self.ledger.account(&address).await?;
        StateView::decode(&self.config.program_id, account.as_ref())
    }

    async fn build_transaction(
        &self,
        call: &InitializeCall,
        signer: &dyn Signer,
    ) -> Result<Transaction> {
        let blockhash = self.ledger.latest_blockhash().await?;
        let message = Message::new(&[call.instruction()], Some(&signer.pubkey()));

        let mut transaction = Transaction::new_unsigned(message);
        let signers: &[&dyn Signer] = &[signer];
        transaction.try_sign(signers, blockhash)?;
        Ok(transaction)
    }
}
