//! Instruction encoding for the Penguin Finance program

use solana_sdk::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

pub const PROGRAM_ID: Pubkey = solana_sdk::pubkey!("GQtLSrEgqfhcETMzQcP4dX2Sgv3WEnxDnCcZCZg6a9m4");
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("11111111111111111111111111111111");

// PDA seeds (must match constants.rs in the program)
pub const STATE_SEED: &[u8] = b"state";

pub fn anchor_discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{}:{}", namespace, name);
    let digest = hash(preimage.as_bytes());
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&digest.to_bytes()[..8]);
    disc
}

pub fn ix_discriminator(name: &str) -> [u8; 8] {
    anchor_discriminator("global", name)
}

pub fn account_discriminator(name: &str) -> [u8; 8] {
    anchor_discriminator("account", name)
}

/// Derives the canonical state PDA and its bump
pub fn find_state_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STATE_SEED], program_id)
}

/// A fully specified `initialize` call
///
/// Targets the canonical state PDA unless `with_state` overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeCall {
    pub program_id: Pubkey,
    pub authority: Pubkey,
    pub state: Pubkey,
}

impl InitializeCall {
    pub fn new(program_id: Pubkey, authority: Pubkey) -> Self {
        let (state, _) = find_state_address(&program_id);
        Self {
            program_id,
            authority,
            state,
        }
    }

    pub fn with_state(mut self, state: Pubkey) -> Self {
        self.state = state;
        self
    }

    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(self.state, false),
                AccountMeta::new(self.authority, true),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data: ix_discriminator("initialize").to_vec(),
        }
    }
}
