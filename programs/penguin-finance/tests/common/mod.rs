#![allow(dead_code)]

use async_trait::async_trait;
use litesvm::LiteSVM;
use penguin_client::{
    ClientConfig, ClientError, Finality, InitializeCall, Ledger, ProtocolStateData, StateView,
    SubmissionClient,
};
use solana_sdk::{
    account::Account,
    hash::Hash,
    instruction::{Instruction, InstructionError},
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::{Transaction, TransactionError},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Program IDs
// ---------------------------------------------------------------------------
pub const PROGRAM_ID: Pubkey = penguin_client::PROGRAM_ID;
pub const BPF_UPGRADEABLE_LOADER_ID: Pubkey =
    solana_sdk::pubkey!("BPFLoaderUpgradeab1e11111111111111111111111");

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------
pub const INITIAL_LAMPORTS: u64 = 1_000_000_000;

// ---------------------------------------------------------------------------
// PDA derivation helpers
// ---------------------------------------------------------------------------
pub fn find_state_pda() -> (Pubkey, u8) {
    penguin_client::find_state_address(&PROGRAM_ID)
}

pub fn find_program_data_pda() -> Pubkey {
    Pubkey::find_program_address(&[PROGRAM_ID.as_ref()], &BPF_UPGRADEABLE_LOADER_ID).0
}

// ---------------------------------------------------------------------------
// Transaction helpers
// ---------------------------------------------------------------------------
pub fn send_tx(
    svm: &mut LiteSVM,
    ixs: &[Instruction],
    signers: &[&Keypair],
) -> Result<litesvm::types::TransactionMetadata, litesvm::types::FailedTransactionMetadata> {
    let payer = signers[0].pubkey();
    let blockhash = svm.latest_blockhash();
    let msg = Message::new(ixs, Some(&payer));
    let tx = Transaction::new(signers, msg, blockhash);
    svm.send_transaction(tx)
}

/// Custom error code reported by the first instruction of a failed transaction
pub fn custom_error_code(failed: &litesvm::types::FailedTransactionMetadata) -> Option<u32> {
    match &failed.err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
        _ => None,
    }
}

pub fn funded_keypair(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports).unwrap();
    keypair
}

// ---------------------------------------------------------------------------
// Setup: load program as upgradeable, create payer as upgrade authority
// ---------------------------------------------------------------------------
pub fn setup() -> (LiteSVM, Keypair) {
    let mut svm = LiteSVM::new();

    let payer = Keypair::new();
    svm.airdrop(&payer.pubkey(), 100 * INITIAL_LAMPORTS).unwrap();

    let program_bytes = include_bytes!("../../../../target/deploy/penguin_finance.so");
    let program_data_pda = find_program_data_pda();

    // UpgradeableLoaderState::ProgramData (bincode serialization):
    //   [0..4]:   variant discriminator = 3
    //   [4..12]:  slot: u64
    //   [12]:     Option tag: 1 = Some
    //   [13..45]: upgrade_authority_address: Pubkey
    //   [45..]:   ELF bytes
    let mut program_data_account_data = vec![0u8; 45 + program_bytes.len()];
    program_data_account_data[0..4].copy_from_slice(&3u32.to_le_bytes());
    program_data_account_data[4..12].copy_from_slice(&0u64.to_le_bytes());
    program_data_account_data[12] = 1;
    program_data_account_data[13..45].copy_from_slice(payer.pubkey().as_ref());
    program_data_account_data[45..].copy_from_slice(program_bytes);

    svm.set_account(
        program_data_pda,
        Account {
            executable: false,
            data: program_data_account_data,
            lamports: 100 * INITIAL_LAMPORTS,
            owner: BPF_UPGRADEABLE_LOADER_ID,
            rent_epoch: 0,
        },
    )
    .unwrap();

    // UpgradeableLoaderState::Program (bincode serialization):
    //   [0..4]:   variant discriminator = 2
    //   [4..36]:  programdata_address: Pubkey
    let mut program_account_data = vec![0u8; 36];
    program_account_data[0..4].copy_from_slice(&2u32.to_le_bytes());
    program_account_data[4..36].copy_from_slice(program_data_pda.as_ref());

    svm.set_account(
        PROGRAM_ID,
        Account {
            executable: true,
            data: program_account_data,
            lamports: INITIAL_LAMPORTS,
            owner: BPF_UPGRADEABLE_LOADER_ID,
            rent_epoch: 0,
        },
    )
    .unwrap();

    (svm, payer)
}

/// Initialize the program state. Convenience wrapper used by most tests.
pub fn setup_initialized() -> (LiteSVM, Keypair) {
    let (mut svm, payer) = setup();
    let ix = build_initialize_ix(&payer.pubkey());
    send_tx(&mut svm, &[ix], &[&payer]).expect("initialize failed");
    (svm, payer)
}

// ---------------------------------------------------------------------------
// Instruction builders
// ---------------------------------------------------------------------------
pub fn build_initialize_ix(authority: &Pubkey) -> Instruction {
    InitializeCall::new(PROGRAM_ID, *authority).instruction()
}

pub fn build_initialize_ix_for_state(authority: &Pubkey, state: &Pubkey) -> Instruction {
    InitializeCall::new(PROGRAM_ID, *authority)
        .with_state(*state)
        .instruction()
}

// ---------------------------------------------------------------------------
// State readers
// ---------------------------------------------------------------------------
pub fn read_state_view(svm: &LiteSVM) -> StateView {
    let (state_pda, _) = find_state_pda();
    StateView::decode(&PROGRAM_ID, svm.get_account(&state_pda).as_ref())
        .expect("state account should decode")
}

pub fn read_state(svm: &LiteSVM) -> ProtocolStateData {
    match read_state_view(svm) {
        StateView::Initialized(state) => state,
        StateView::Unallocated => panic!("state account not found"),
    }
}

// ---------------------------------------------------------------------------
// LiteSVM-backed ledger for driving `SubmissionClient`
// ---------------------------------------------------------------------------

/// Executes submitted transactions immediately and records their outcome.
///
/// Admission failures are returned from `submit`; execution failures are only
/// visible through `status`, as on a real cluster without preflight.
pub struct SvmLedger {
    svm: Mutex<LiteSVM>,
    outcomes: Mutex<HashMap<Signature, Finality>>,
    hold_confirmations: Mutex<bool>,
}

impl SvmLedger {
    pub fn new(svm: LiteSVM) -> Self {
        Self {
            svm: Mutex::new(svm),
            outcomes: Mutex::new(HashMap::new()),
            hold_confirmations: Mutex::new(false),
        }
    }

    /// While held, every status query reports `Pending`
    pub fn hold_confirmations(&self, hold: bool) {
        *self.hold_confirmations.lock().unwrap() = hold;
    }

    /// Number of transactions that reached execution
    pub fn submitted(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }

    pub fn with_svm<T>(&self, f: impl FnOnce(&mut LiteSVM) -> T) -> T {
        f(&mut self.svm.lock().unwrap())
    }
}

#[async_trait(?Send)]
impl Ledger for SvmLedger {
    async fn latest_blockhash(&self) -> penguin_client::Result<Hash> {
        Ok(self.svm.lock().unwrap().latest_blockhash())
    }

    async fn submit(&self, transaction: &Transaction) -> penguin_client::Result<Signature> {
        let signature = transaction.signatures[0];
        let result = {
            let mut svm = self.svm.lock().unwrap();
            let result = svm.send_transaction(transaction.clone());
            // Next transaction gets a fresh blockhash, so identical calls stay distinct
            svm.expire_blockhash();
            result
        };

        let outcome = match result {
            Ok(_) => Finality::Finalized,
            Err(failed) => match failed.err {
                TransactionError::InstructionError(..) => Finality::Failed {
                    error: failed.err,
                    logs: failed.meta.logs,
                },
                error => {
                    return Err(ClientError::from_transaction_error(error, failed.meta.logs))
                }
            },
        };
        self.outcomes.lock().unwrap().insert(signature, outcome);
        Ok(signature)
    }

    async fn status(&self, signature: &Signature) -> penguin_client::Result<Finality> {
        if *self.hold_confirmations.lock().unwrap() {
            return Ok(Finality::Pending);
        }
        Ok(self
            .outcomes
            .lock()
            .unwrap()
            .get(signature)
            .cloned()
            .unwrap_or(Finality::Pending))
    }

    async fn account(&self, address: &Pubkey) -> penguin_client::Result<Option<Account>> {
        Ok(self.svm.lock().unwrap().get_account(address))
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        confirmation_timeout_ms: 200,
        poll_interval_ms: 10,
        ..ClientConfig::default()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Loaded program wrapped in a shared ledger, plus a funded payer
pub fn setup_client() -> (SubmissionClient<Arc<SvmLedger>>, Arc<SvmLedger>, Keypair) {
    init_tracing();
    let (svm, payer) = setup();
    let ledger = Arc::new(SvmLedger::new(svm));
    let client = SubmissionClient::new(ledger.clone(), test_config());
    (client, ledger, payer)
}
