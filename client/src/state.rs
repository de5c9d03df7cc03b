//! Read-side view of the protocol state account

use crate::error::{ClientError, Result};
use crate::instruction::account_discriminator;
use solana_sdk::{account::Account, pubkey::Pubkey};

// Layout after the 8-byte discriminator: authority (32) | status (1) | bump (1) | reserved (64)
const AUTHORITY_OFFSET: usize = 8;
const STATUS_OFFSET: usize = AUTHORITY_OFFSET + 32;
const BUMP_OFFSET: usize = STATUS_OFFSET + 1;
pub const STATE_ACCOUNT_LEN: usize = BUMP_OFFSET + 1 + 64;

const STATUS_INITIALIZED: u8 = 1;

/// Decoded contents of an initialized state account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolStateData {
    pub authority: Pubkey,
    pub initialized: bool,
    pub bump: u8,
}

/// What the canonical state address currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateView {
    Unallocated,
    Initialized(ProtocolStateData),
}

impl StateView {
    /// Decodes the account found at the state address.
    ///
    /// Missing, empty or foreign-owned accounts read as `Unallocated`.
    pub fn decode(program_id: &Pubkey, account: Option<&Account>) -> Result<Self> {
        let account = match account {
            Some(account) if account.owner == *program_id && !account.data.is_empty() => account,
            _ => return Ok(StateView::Unallocated),
        };
        let data = &account.data;

        if data.len() < STATE_ACCOUNT_LEN {
            return Err(ClientError::InvalidStateAccount(format!(
                "expected at least {} bytes, found {}",
                STATE_ACCOUNT_LEN,
                data.len()
            )));
        }
        if data[..8] != account_discriminator("ProtocolState") {
            return Err(ClientError::InvalidStateAccount(
                "discriminator mismatch".to_string(),
            ));
        }
        if data[STATUS_OFFSET] != STATUS_INITIALIZED {
            return Err(ClientError::InvalidStateAccount(format!(
                "unexpected status tag {}",
                data[STATUS_OFFSET]
            )));
        }

        let mut authority = [0u8; 32];
        authority.copy_from_slice(&data[AUTHORITY_OFFSET..STATUS_OFFSET]);

        Ok(StateView::Initialized(ProtocolStateData {
            authority: Pubkey::new_from_array(authority),
            initialized: true,
            bump: data[BUMP_OFFSET],
        }))
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, StateView::Initialized(_))
    }

    pub fn authority(&self) -> Option<Pubkey> {
        match self {
            StateView::Initialized(state) => Some(state.authority),
            StateView::Unallocated => None,
        }
    }
}
