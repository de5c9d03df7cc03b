use anchor_lang::prelude::*;
use instructions::*;

// Program ID declaration
declare_id!("GQtLSrEgqfhcETMzQcP4dX2Sgv3WEnxDnCcZCZg6a9m4");

pub mod constants;
pub mod instructions;
pub mod state;

/// The main program module for Penguin Finance.
///
/// Only the protocol bootstrap lives here: a single `initialize` instruction that
/// creates the program's singleton state account at a well-known PDA and records
/// the caller as its authority.
///
/// # Security
/// - The state account is addressed by the `"state"` seed only, so any client can
///   re-derive it and the ledger refuses a second account at the same address.
/// - `initialize` succeeds at most once per deployment; later calls fail with
///   `AlreadyInitialized` and leave the stored record untouched.
#[program]
pub mod penguin_finance {
    use super::*;

    /// Initializes the protocol state.
    ///
    /// Delegates to `initialize::initialize` to create the state PDA and record
    /// the signer as the protocol authority.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize::initialize(ctx)
    }
}
