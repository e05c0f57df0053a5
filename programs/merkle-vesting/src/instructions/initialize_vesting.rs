use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{VAULT_SEED, VESTING_CONFIG_SEED};
use crate::state::{VestingConfig, VestingSchedule};

pub(crate) fn initialize_vesting(
    ctx: Context<InitializeVesting>,
    merkle_root: [u8; 32],
    total_vesting_duration: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let schedule = VestingSchedule::new(now, total_vesting_duration)?;

    let config = &mut ctx.accounts.config;
    config.merkle_root = merkle_root;
    config.total_vesting_duration = schedule.total_vesting_duration;
    config.vesting_start_time = now;
    config.vesting_end_time = schedule.vesting_end_time;
    config.reward_mint = ctx.accounts.reward_mint.key();
    config.vault = ctx.accounts.vault.key();
    config.activated_positions = 0;
    config.total_settled = 0;
    config.bump = ctx.bumps.config;
    config.vault_bump = ctx.bumps.vault;

    msg!(
        "vesting initialized: duration={} end={}",
        config.total_vesting_duration,
        config.vesting_end_time
    );

    emit!(VestingInitialized {
        merkle_root,
        reward_mint: config.reward_mint,
        vault: config.vault,
        vesting_start_time: now,
        vesting_end_time: config.vesting_end_time,
        total_vesting_duration: config.total_vesting_duration,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVesting<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + VestingConfig::SIZE,
        seeds = [VESTING_CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, VestingConfig>,

    #[account(
        init,
        payer = payer,
        token::mint = reward_mint,
        token::authority = config,
        seeds = [VAULT_SEED, config.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub reward_mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingInitialized {
    pub merkle_root: [u8; 32],
    pub reward_mint: Pubkey,
    pub vault: Pubkey,
    pub vesting_start_time: i64,
    pub vesting_end_time: i64,
    pub total_vesting_duration: i64,
}
