use anchor_lang::prelude::*;

use crate::constants::{seeds, ANCHOR_DISCRIMINATOR_SIZE};

/// Lifecycle of the protocol state account
///
/// `Unallocated` is what readers report for the canonical address before the
/// bootstrap has run. A record stored on-ledger is always `Initialized`, and
/// no instruction moves it back.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum StateStatus {
    Unallocated,
    Initialized,
}

/// Global program state created once by `initialize`
///
/// Lives at the PDA derived from `[seeds::STATE]`, so every caller can locate it
/// without coordination.
#[account]
#[derive(InitSpace)]
pub struct ProtocolState {
    /// Identity permitted to perform privileged operations
    pub authority: Pubkey,
    /// Explicit lifecycle tag, `Initialized` for every stored record
    pub status: StateStatus,
    /// PDA bump seed for account derivation
    pub bump: u8,
    /// Reserved space for future program state extensions
    pub reserved: [u8; 64],
}

impl ProtocolState {
    /// Total account size including the Anchor discriminator
    pub const SPACE: usize = ANCHOR_DISCRIMINATOR_SIZE + Self::INIT_SPACE;

    pub fn new(authority: Pubkey, bump: u8) -> Self {
        Self {
            authority,
            status: StateStatus::Initialized,
            bump,
            reserved: [0; 64],
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.status == StateStatus::Initialized
    }
}

/// Derives the canonical state address and its bump for `program_id`
pub fn find_state_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::STATE], program_id)
}
