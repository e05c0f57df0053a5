use anchor_lang::prelude::*;

use crate::constants::{ALLOCATION_SEED, VESTING_CONFIG_SEED};
use crate::state::{Allocation, VestingConfig};

/// Read-only. A missing allocation account means the index was never
/// activated and reports zero.
pub(crate) fn get_claimable_amount(ctx: Context<GetClaimableAmount>, index: u64) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let schedule = ctx.accounts.config.schedule();

    let amount = match &ctx.accounts.allocation {
        Some(allocation) => allocation.claimable_amount(now, &schedule)?,
        None => 0,
    };
    msg!("position {} claimable {}", index, amount);
    Ok(amount)
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct GetClaimableAmount<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        seeds = [ALLOCATION_SEED, config.key().as_ref(), &index.to_le_bytes()],
        bump
    )]
    pub allocation: Option<Account<'info, Allocation>>,
}
