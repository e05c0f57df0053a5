use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{ALLOCATION_SEED, POSITION_SEED, VAULT_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{Allocation, Position, VestingConfig};

/// Permissionless settlement of an activated position; funds always go to
/// the current holder.
pub(crate) fn settle_position(ctx: Context<SettlePosition>, index: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let schedule = accounts.config.schedule();

    let holder = accounts.position.owner_of()?;
    require_keys_eq!(
        accounts.holder_token_account.owner,
        holder,
        VestingError::InvalidTokenAccount
    );

    let amount = accounts.allocation.settle(now, &schedule, |amount| {
        pay_holder(
            &accounts.token_program,
            &accounts.config,
            &accounts.vault,
            &accounts.holder_token_account,
            amount,
        )
    })?;

    msg!("position {} settled {} to {}", index, amount, holder);
    record_settlement(&mut accounts.config, &accounts.allocation, holder, amount)
}

/// Vault -> holder transfer signed by the config PDA. Any shortfall or CPI
/// failure surfaces as `TransferFailed`.
pub(crate) fn pay_holder<'info>(
    token_program: &Program<'info, Token>,
    config: &Account<'info, VestingConfig>,
    vault: &Account<'info, TokenAccount>,
    holder_token_account: &Account<'info, TokenAccount>,
    amount: u64,
) -> Result<()> {
    let amount = match payout_plan(vault.amount, amount) {
        Ok(Some(amount)) => amount,
        Ok(None) => return Ok(()),
        Err(e) => {
            msg!("vault balance {} below settlement {}", vault.amount, amount);
            return Err(e.into());
        }
    };

    let bump = [config.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[VESTING_CONFIG_SEED, &bump]];
    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: vault.to_account_info(),
                to: holder_token_account.to_account_info(),
                authority: config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
    .map_err(|e| {
        msg!("reward transfer failed: {:?}", e);
        error!(VestingError::TransferFailed)
    })
}

/// Amount to move out of the vault: `None` for a zero settlement (no CPI),
/// `TransferFailed` when the pool cannot cover it.
pub(crate) fn payout_plan(
    vault_balance: u64,
    amount: u64,
) -> std::result::Result<Option<u64>, VestingError> {
    if amount == 0 {
        return Ok(None);
    }
    if vault_balance < amount {
        return Err(VestingError::TransferFailed);
    }
    Ok(Some(amount))
}

pub(crate) fn record_settlement(
    config: &mut VestingConfig,
    allocation: &Allocation,
    holder: Pubkey,
    amount: u64,
) -> Result<()> {
    config.total_settled = config
        .total_settled
        .checked_add(amount)
        .ok_or(VestingError::MathOverflow)?;

    emit!(PositionSettled {
        index: allocation.index,
        holder,
        amount,
        last_claimed_at: allocation.last_claimed_at,
        total_paid: allocation.total_paid,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct SettlePosition<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [ALLOCATION_SEED, config.key().as_ref(), &index.to_le_bytes()],
        bump = allocation.bump
    )]
    pub allocation: Account<'info, Allocation>,

    #[account(
        seeds = [POSITION_SEED, config.key().as_ref(), &index.to_le_bytes()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        seeds = [VAULT_SEED, config.key().as_ref()],
        bump = config.vault_bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = holder_token_account.mint == config.reward_mint @ VestingError::InvalidTokenMint,
    )]
    pub holder_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Emitted on every settlement, including zero-amount and transfer-triggered ones.
#[event]
pub struct PositionSettled {
    pub index: u64,
    pub holder: Pubkey,
    pub amount: u64,
    pub last_claimed_at: i64,
    pub total_paid: u64,
}
