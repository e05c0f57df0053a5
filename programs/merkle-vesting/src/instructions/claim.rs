use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{
    ALLOCATION_SEED, MAX_PROOF_DEPTH, POSITION_SEED, VAULT_SEED, VESTING_CONFIG_SEED,
};
use crate::error::VestingError;
use crate::instructions::settle_position::{pay_holder, record_settlement};
use crate::state::{Allocation, Position, VestingConfig};
use crate::utils::merkle::{self, BeneficiaryLeaf};

/// Activates `index` on first use (proof-gated), then settles it.
pub(crate) fn claim(
    ctx: Context<Claim>,
    index: u64,
    account: Pubkey,
    share: u64,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let allocation_bump = ctx.bumps.allocation;
    let position_bump = ctx.bumps.position;
    let accounts = ctx.accounts;
    let schedule = accounts.config.schedule();

    let leaf = BeneficiaryLeaf {
        index,
        account,
        share,
    };
    let activated = activate_position(
        &mut accounts.allocation,
        &mut accounts.position,
        &accounts.config,
        &leaf,
        &proof,
        now,
    )?;
    if activated {
        accounts.allocation.bump = allocation_bump;
        accounts.position.bump = position_bump;
        accounts.config.activated_positions = accounts
            .config
            .activated_positions
            .checked_add(1)
            .ok_or(VestingError::MathOverflow)?;

        emit!(PositionActivated {
            index,
            holder: account,
            share,
            last_claimed_at: accounts.allocation.last_claimed_at,
        });
    }

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

    record_settlement(&mut accounts.config, &accounts.allocation, holder, amount)
}

/// Mint-once activation. Returns `false` without touching anything (and
/// without looking at the arguments) when the index is already active.
pub(crate) fn activate_position(
    allocation: &mut Allocation,
    position: &mut Position,
    config: &VestingConfig,
    leaf: &BeneficiaryLeaf,
    proof: &[[u8; 32]],
    now_ts: i64,
) -> std::result::Result<bool, VestingError> {
    if allocation.is_activated() {
        return Ok(false);
    }
    if leaf.account == Pubkey::default() || proof.len() > MAX_PROOF_DEPTH {
        return Err(VestingError::InvalidProof);
    }
    if !merkle::verify(proof, &config.merkle_root, &leaf.hash()) {
        return Err(VestingError::InvalidProof);
    }

    allocation.activate(leaf.index, leaf.share, now_ts, &config.schedule());
    position.mint(leaf.index, leaf.account);
    Ok(true)
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct Claim<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Allocation::SIZE,
        seeds = [ALLOCATION_SEED, config.key().as_ref(), &index.to_le_bytes()],
        bump
    )]
    pub allocation: Account<'info, Allocation>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Position::SIZE,
        seeds = [POSITION_SEED, config.key().as_ref(), &index.to_le_bytes()],
        bump
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

    /// Pays rent on first activation; need not be the beneficiary.
    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct PositionActivated {
    pub index: u64,
    pub holder: Pubkey,
    pub share: u64,
    pub last_claimed_at: i64,
}
