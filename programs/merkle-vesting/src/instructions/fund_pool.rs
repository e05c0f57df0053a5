use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{VAULT_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::VestingConfig;

/// Tops up the reward pool. Anyone may fund it; sufficiency is not tracked.
pub(crate) fn fund_pool(ctx: Context<FundPool>, amount: u64) -> Result<()> {
    check_deposit(
        amount,
        &ctx.accounts.config.reward_mint,
        &ctx.accounts.funder_token_account.mint,
        &ctx.accounts.funder_token_account.owner,
        &ctx.accounts.funder.key(),
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.vault.reload()?;

    emit!(PoolFunded {
        funder: ctx.accounts.funder.key(),
        amount,
        vault_balance: ctx.accounts.vault.amount,
    });

    Ok(())
}

/// Non-zero amount, reward mint, and a source account owned by the signer.
pub(crate) fn check_deposit(
    amount: u64,
    reward_mint: &Pubkey,
    source_mint: &Pubkey,
    source_owner: &Pubkey,
    funder: &Pubkey,
) -> std::result::Result<(), VestingError> {
    if amount == 0 {
        return Err(VestingError::InvalidAmount);
    }
    if source_mint != reward_mint {
        return Err(VestingError::InvalidTokenMint);
    }
    if source_owner != funder {
        return Err(VestingError::InvalidTokenAccount);
    }
    Ok(())
}

#[derive(Accounts)]
pub struct FundPool<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [VAULT_SEED, config.key().as_ref()],
        bump = config.vault_bump,
        constraint = vault.mint == config.reward_mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub funder_token_account: Account<'info, TokenAccount>,

    pub funder: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct PoolFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
}
