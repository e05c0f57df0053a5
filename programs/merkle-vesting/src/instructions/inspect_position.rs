use anchor_lang::prelude::*;

use crate::constants::{ALLOCATION_SEED, POSITION_SEED, VESTING_CONFIG_SEED};
use crate::state::{Allocation, Position, VestingConfig, VestingSchedule};

/// Diagnostic view of one position. Never settles.
pub(crate) fn inspect_position(ctx: Context<InspectPosition>, index: u64) -> Result<PositionSnapshot> {
    let now = Clock::get()?.unix_timestamp;
    let schedule = ctx.accounts.config.schedule();

    let snapshot = snapshot(
        index,
        &ctx.accounts.allocation,
        &ctx.accounts.position,
        &schedule,
        now,
    )?;

    emit!(PositionInspected {
        index,
        holder: snapshot.holder,
        share: snapshot.share,
        elapsed_since_last_claim: snapshot.elapsed_since_last_claim,
        claimable_amount: snapshot.claimable_amount,
        activated_at: snapshot.activated_at,
    });

    Ok(snapshot)
}

pub(crate) fn snapshot(
    index: u64,
    allocation: &Allocation,
    position: &Position,
    schedule: &VestingSchedule,
    now_ts: i64,
) -> Result<PositionSnapshot> {
    Ok(PositionSnapshot {
        index,
        holder: position.owner_of()?,
        share: allocation.share,
        elapsed_since_last_claim: allocation.elapsed_since_last_claim(now_ts),
        claimable_amount: allocation.claimable_amount(now_ts, schedule)?,
        total_paid: allocation.total_paid,
        activated_at: allocation.activated_at,
    })
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub index: u64,
    pub holder: Pubkey,
    pub share: u64,
    pub elapsed_since_last_claim: i64,
    pub claimable_amount: u64,
    pub total_paid: u64,
    /// Raw clock at activation (may lie past the horizon).
    pub activated_at: i64,
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct InspectPosition<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        seeds = [ALLOCATION_SEED, config.key().as_ref(), &index.to_le_bytes()],
        bump = allocation.bump
    )]
    pub allocation: Account<'info, Allocation>,

    #[account(
        seeds = [POSITION_SEED, config.key().as_ref(), &index.to_le_bytes()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,
}

#[event]
pub struct PositionInspected {
    pub index: u64,
    pub holder: Pubkey,
    pub share: u64,
    pub elapsed_since_last_claim: i64,
    pub claimable_amount: u64,
    pub activated_at: i64,
}
