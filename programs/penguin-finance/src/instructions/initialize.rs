use crate::constants::seeds;
use crate::state::{find_state_address, ProtocolState};
use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_lang::Accounts;

/// Error codes for the initialize instruction.
#[error_code]
pub enum InitializeErrorCode {
    /// The state account already holds a populated record.
    #[msg("Protocol state is already initialized")]
    AlreadyInitialized,
    /// The supplied state account is not the canonical PDA.
    #[msg("State account does not match the canonical derivation")]
    AddressMismatch,
    /// The authority cannot cover the rent-exempt deposit of the state account.
    #[msg("Authority cannot cover the state account deposit")]
    InsufficientFunds,
}

/// Account structure for initializing the program state.
///
/// The state account is taken unchecked so that the handler can report address,
/// re-initialization and funding failures with its own error codes before the
/// account is created.
///
/// # Preconditions
/// - `state` must be the PDA derived from `[seeds::STATE]`.
/// - `state` must not already hold a record owned by this program.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The program state account, created and populated by this instruction.
    ///
    /// CHECK: address, ownership and emptiness are validated in `initialize`.
    #[account(mut)]
    pub state: UncheckedAccount<'info>,

    /// The signer funding and authorizing the state initialization, becomes the authority.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Solana System program for account creation and rent payment.
    pub system_program: Program<'info, System>,
}

/// Initializes the program state with the signer as its authority.
///
/// Creates the state PDA, paying the rent-exempt deposit from `authority`, and
/// writes `authority`, the `Initialized` status and the canonical bump in one
/// step. The whole instruction is atomic, so a failure leaves nothing behind.
///
/// # Arguments
/// - `ctx`: Context containing the accounts to initialize the state.
///
/// # Returns
/// A `Result` indicating success or failure.
///
/// # Errors
/// - `AddressMismatch` if `state` is not the canonical PDA.
/// - `AlreadyInitialized` if `state` already holds a program-owned record.
/// - `InsufficientFunds` if `authority` cannot pay the deposit and stay rent-exempt.
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let (state_pda, bump) = find_state_address(ctx.program_id);
    require_keys_eq!(
        ctx.accounts.state.key(),
        state_pda,
        InitializeErrorCode::AddressMismatch
    );

    let state_info = ctx.accounts.state.to_account_info();
    require!(
        state_info.owner != ctx.program_id && state_info.data_is_empty(),
        InitializeErrorCode::AlreadyInitialized
    );

    let rent = Rent::get()?;
    let deposit = rent.minimum_balance(ProtocolState::SPACE);
    let shortfall = deposit.saturating_sub(state_info.lamports());
    let payer = ctx.accounts.authority.to_account_info();
    // The payer may be drained to zero but must otherwise stay rent-exempt.
    let remaining = payer.lamports().checked_sub(shortfall);
    require!(
        remaining.is_some_and(|left| left == 0 || rent.is_exempt(left, payer.data_len())),
        InitializeErrorCode::InsufficientFunds
    );

    claim_state_account(&ctx, bump, deposit, shortfall)?;

    let mut data = state_info.try_borrow_mut_data()?;
    ProtocolState::new(ctx.accounts.authority.key(), bump).try_serialize(&mut &mut data[..])?;

    msg!("Protocol state initialized");
    msg!("Authority: {}", ctx.accounts.authority.key());
    Ok(())
}

/// Allocates the state PDA and assigns it to this program.
///
/// An empty address is created in one system call. An address that was
/// pre-funded by someone else cannot go through `create_account`, so it is
/// topped up, allocated and assigned instead.
fn claim_state_account(
    ctx: &Context<Initialize>,
    bump: u8,
    deposit: u64,
    shortfall: u64,
) -> Result<()> {
    let bump_seed = [bump];
    let state_seeds = &[seeds::STATE, bump_seed.as_slice()];
    let signer_seeds = &[state_seeds.as_slice()];

    let system_program = ctx.accounts.system_program.key();
    let state = ctx.accounts.state.to_account_info();
    let authority = ctx.accounts.authority.to_account_info();

    if state.lamports() == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program,
                CreateAccount {
                    from: authority,
                    to: state,
                },
                signer_seeds,
            ),
            deposit,
            ProtocolState::SPACE as u64,
            ctx.program_id,
        );
    }

    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program,
                Transfer {
                    from: authority,
                    to: state.clone(),
                },
            ),
            shortfall,
        )?;
    }

    system_program::allocate(
        CpiContext::new_with_signer(
            system_program,
            Allocate {
                account_to_allocate: state.clone(),
            },
            signer_seeds,
        ),
        ProtocolState::SPACE as u64,
    )?;

    system_program::assign(
        CpiContext::new_with_signer(
            system_program,
            Assign {
                account_to_assign: state,
            },
            signer_seeds,
        ),
        ctx.program_id,
    )
}
