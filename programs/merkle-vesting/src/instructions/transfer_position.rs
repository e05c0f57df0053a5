use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{ALLOCATION_SEED, POSITION_SEED, VAULT_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::instructions::settle_position::{pay_holder, record_settlement};
use crate::state::{Allocation, Position, VestingConfig, VestingSchedule};

/// Hands a position to `new_holder` after paying the current holder
/// everything vested so far.
pub(crate) fn transfer_position(
    ctx: Context<TransferPosition>,
    index: u64,
    new_holder: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let schedule = accounts.config.schedule();
    let from = accounts.holder.key();

    require_keys_eq!(
        accounts.holder_token_account.owner,
        from,
        VestingError::InvalidTokenAccount
    );

    let amount = transfer_with_settlement(
        &mut accounts.allocation,
        &mut accounts.position,
        &schedule,
        now,
        from,
        new_holder,
        |amount| {
            pay_holder(
                &accounts.token_program,
                &accounts.config,
                &accounts.vault,
                &accounts.holder_token_account,
                amount,
            )
        },
    )?;

    record_settlement(&mut accounts.config, &accounts.allocation, from, amount)?;

    emit!(PositionTransferred {
        index,
        from,
        to: new_holder,
        settled_amount: amount,
        accrual_start: accounts.allocation.last_claimed_at,
    });

    Ok(())
}

/// Settle to the outgoing holder, then change ownership. The two steps are
/// fixed; there is no path that moves a position without settling it first.
pub(crate) fn transfer_with_settlement<F>(
    allocation: &mut Allocation,
    position: &mut Position,
    schedule: &VestingSchedule,
    now_ts: i64,
    from: Pubkey,
    to: Pubkey,
    pay: F,
) -> Result<u64>
where
    F: FnOnce(u64) -> Result<()>,
{
    let amount = allocation.settle(now_ts, schedule, pay)?;
    position.base_transfer(from, to)?;
    Ok(amount)
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct TransferPosition<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [ALLOCATION_SEED, config.key().as_ref(), &index.to_le_bytes()],
        bump = allocation.bump
    )]
    pub allocation: Account<'info, Allocation>,

    #[account(
        mut,
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

    /// Outgoing holder's reward account; receives the forced settlement.
    #[account(
        mut,
        constraint = holder_token_account.mint == config.reward_mint @ VestingError::InvalidTokenMint,
    )]
    pub holder_token_account: Account<'info, TokenAccount>,

    pub holder: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct PositionTransferred {
    pub index: u64,
    pub from: Pubkey,
    pub to: Pubkey,
    pub settled_amount: u64,
    pub accrual_start: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 2_000_000_000;

    fn key(b: u8) -> Pubkey {
        Pubkey::new_from_array([b; 32])
    }

    fn setup(share: u64) -> (Allocation, Position, VestingSchedule) {
        let schedule = VestingSchedule::new(T0, 100).unwrap();
        let mut alloc = Allocation::default();
        alloc.activate(4, share, T0, &schedule);
        let mut pos = Position::default();
        pos.mint(4, key(1));
        (alloc, pos, schedule)
    }

    #[test]
    fn outgoing_holder_is_paid_and_incoming_starts_fresh() {
        let (mut alloc, mut pos, schedule) = setup(1_000);
        let mut payouts = Vec::new();

        let holder = pos.owner_of().unwrap();
        let paid = transfer_with_settlement(
            &mut alloc,
            &mut pos,
            &schedule,
            T0 + 30,
            holder,
            key(2),
            |amount| {
                payouts.push((holder, amount));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(paid, 300);
        assert_eq!(payouts, vec![(key(1), 300)]);
        assert_eq!(pos.owner_of().unwrap(), key(2));
        assert_eq!(alloc.last_claimed_at, T0 + 30);

        // The new holder only accrues from the transfer instant.
        assert_eq!(alloc.claimable_amount(T0 + 50, &schedule).unwrap(), 200);
        assert_eq!(alloc.claimable_amount(T0 + 500, &schedule).unwrap(), 700);
    }

    #[test]
    fn failed_payout_blocks_the_transfer() {
        let (mut alloc, mut pos, schedule) = setup(1_000);
        let res = transfer_with_settlement(
            &mut alloc,
            &mut pos,
            &schedule,
            T0 + 30,
            key(1),
            key(2),
            |_| Err(VestingError::TransferFailed.into()),
        );
        assert!(res.is_err());
        assert_eq!(pos.owner_of().unwrap(), key(1));
        assert_eq!(alloc.last_claimed_at, T0);
    }

    #[test]
    fn transfer_after_horizon_pays_remainder_and_leaves_nothing() {
        let (mut alloc, mut pos, schedule) = setup(1_000);
        alloc.settle(T0 + 60, &schedule, |_| Ok(())).unwrap();

        let paid = transfer_with_settlement(
            &mut alloc,
            &mut pos,
            &schedule,
            T0 + 400,
            key(1),
            key(3),
            |_| Ok(()),
        )
        .unwrap();
        assert_eq!(paid, 400);
        assert_eq!(alloc.total_paid, 1_000);
        assert_eq!(alloc.claimable_amount(T0 + 900, &schedule).unwrap(), 0);
    }

    #[test]
    fn chained_transfers_split_the_share_by_holding_time() {
        let (mut alloc, mut pos, schedule) = setup(1_000);
        let mut received = std::collections::BTreeMap::new();

        for (at, from, to) in [(T0 + 25, 1, 2), (T0 + 75, 2, 3)] {
            transfer_with_settlement(
                &mut alloc,
                &mut pos,
                &schedule,
                at,
                key(from),
                key(to),
                |amount| {
                    *received.entry(from).or_insert(0u64) += amount;
                    Ok(())
                },
            )
            .unwrap();
        }
        let last = alloc.settle(T0 + 100, &schedule, |_| Ok(())).unwrap();

        assert_eq!(received[&1], 250);
        assert_eq!(received[&2], 500);
        assert_eq!(last, 250);
    }
}
