use anchor_lang::prelude::*;

/// Custom error codes for the merkle vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Merkle proof does not match the committed root")]
    InvalidProof,

    #[msg("Reward transfer to the position holder failed")]
    TransferFailed,

    #[msg("Invalid configuration (vesting duration must be > 0)")]
    InvalidConfiguration,

    #[msg("Position has not been activated")]
    PositionNotActivated,

    #[msg("Signer is not the current position holder")]
    NotPositionHolder,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account for position holder")]
    InvalidTokenAccount,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Math overflow")]
    MathOverflow,
}
