//! Error types for the submission client

use solana_sdk::{
    instruction::InstructionError, signature::Signature, signer::SignerError,
    transaction::TransactionError,
};
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Anchor places program error codes after this offset
const ANCHOR_ERROR_OFFSET: u32 = 6000;

/// Failures raised by the `initialize` handler itself
///
/// Codes follow the declaration order of the program's `InitializeErrorCode`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerError {
    #[error("protocol state is already initialized")]
    AlreadyInitialized,

    #[error("state account does not match the canonical derivation")]
    AddressMismatch,

    #[error("authority cannot cover the state account deposit")]
    InsufficientFunds,
}

impl HandlerError {
    pub fn code(self) -> u32 {
        ANCHOR_ERROR_OFFSET
            + match self {
                HandlerError::AlreadyInitialized => 0,
                HandlerError::AddressMismatch => 1,
                HandlerError::InsufficientFunds => 2,
            }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code.checked_sub(ANCHOR_ERROR_OFFSET)? {
            0 => Some(HandlerError::AlreadyInitialized),
            1 => Some(HandlerError::AddressMismatch),
            2 => Some(HandlerError::InsufficientFunds),
            _ => None,
        }
    }
}

/// Main error type for the submission client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The ledger refused the transaction before executing it
    #[error("transaction rejected before execution: {reason}")]
    SubmissionRejected { reason: String, logs: Vec<String> },

    /// The transaction executed and one of its instructions failed
    #[error("execution reverted: {}", revert_reason(.kind, .error))]
    ExecutionReverted {
        kind: Option<HandlerError>,
        error: TransactionError,
        logs: Vec<String>,
    },

    /// Finality was not observed in time; the transaction may still land
    #[error("confirmation of {signature} not observed within {waited:?}")]
    ConfirmationTimeout {
        signature: Signature,
        waited: Duration,
    },

    #[error("failed to sign transaction: {0}")]
    Signing(#[from] SignerError),

    #[error("rpc error: {0}")]
    Rpc(#[source] Box<solana_client::client_error::ClientError>),

    #[error("invalid state account: {0}")]
    InvalidStateAccount(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Classifies a ledger-reported transaction error.
    ///
    /// Instruction failures mean the handler ran and reverted; anything else was
    /// caught by the ledger's admission checks.
    pub fn from_transaction_error(error: TransactionError, logs: Vec<String>) -> Self {
        match error {
            TransactionError::InstructionError(_, ref instruction_error) => {
                let kind = match instruction_error {
                    InstructionError::Custom(code) => HandlerError::from_code(*code),
                    _ => None,
                };
                ClientError::ExecutionReverted { kind, error, logs }
            }
            other => ClientError::SubmissionRejected {
                reason: other.to_string(),
                logs,
            },
        }
    }

    /// Handler error carried by an `ExecutionReverted`, if it could be decoded
    pub fn handler_error(&self) -> Option<HandlerError> {
        match self {
            ClientError::ExecutionReverted { kind, .. } => *kind,
            _ => None,
        }
    }

    /// Execution or simulation log attached to the failure
    pub fn logs(&self) -> &[String] {
        match self {
            ClientError::SubmissionRejected { logs, .. }
            | ClientError::ExecutionReverted { logs, .. } => logs,
            _ => &[],
        }
    }
}

fn revert_reason(kind: &Option<HandlerError>, error: &TransactionError) -> String {
    match kind {
        Some(kind) => format!("{kind} ({error})"),
        None => error.to_string(),
    }
}
