//! Off-chain client for the Penguin Finance program.
//!
//! Builds the `initialize` instruction, signs and submits it through a [`Ledger`],
//! and waits for the ledger to report a final outcome. [`RpcLedger`] talks to a
//! cluster over JSON-RPC; tests can provide their own [`Ledger`].

pub mod client;
pub mod config;
pub mod error;
pub mod instruction;
pub mod ledger;
pub mod rpc;
pub mod state;

pub use client::SubmissionClient;
pub use config::{ClientConfig, Commitment};
pub use error::{ClientError, HandlerError, Result};
pub use instruction::{find_state_address, InitializeCall, PROGRAM_ID};
pub use ledger::{Finality, Ledger};
pub use rpc::RpcLedger;
pub use state::{ProtocolStateData, StateView};
