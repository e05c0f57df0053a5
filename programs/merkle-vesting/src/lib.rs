use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("2Yz9DM78a2ZpJqBbdS4nZjxk2ojPKHuvsUfVGNmKcAZN");

#[program]
pub mod merkle_vesting {
    use super::*;

    pub fn initialize_vesting(
        ctx: Context<InitializeVesting>,
        merkle_root: [u8; 32],
        total_vesting_duration: i64,
    ) -> Result<()> {
        instructions::initialize_vesting::initialize_vesting(ctx, merkle_root, total_vesting_duration)
    }

    pub fn fund_pool(ctx: Context<FundPool>, amount: u64) -> Result<()> {
        instructions::fund_pool::fund_pool(ctx, amount)
    }

    pub fn claim(
        ctx: Context<Claim>,
        index: u64,
        account: Pubkey,
        share: u64,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::claim::claim(ctx, index, account, share, proof)
    }

    pub fn settle_position(ctx: Context<SettlePosition>, index: u64) -> Result<()> {
        instructions::settle_position::settle_position(ctx, index)
    }

    pub fn transfer_position(
        ctx: Context<TransferPosition>,
        index: u64,
        new_holder: Pubkey,
    ) -> Result<()> {
        instructions::transfer_position::transfer_position(ctx, index, new_holder)
    }

    pub fn get_claimable_amount(ctx: Context<GetClaimableAmount>, index: u64) -> Result<u64> {
        instructions::get_claimable_amount::get_claimable_amount(ctx, index)
    }

    pub fn inspect_position(
        ctx: Context<InspectPosition>,
        index: u64,
    ) -> Result<PositionSnapshot> {
        instructions::inspect_position::inspect_position(ctx, index)
    }
}
