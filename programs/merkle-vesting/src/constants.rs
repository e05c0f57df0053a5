//! Program-wide constants.

/// Seed of the singleton vesting configuration PDA.
pub const VESTING_CONFIG_SEED: &[u8] = b"vesting_config";

/// Seed of the reward vault token account PDA (`[VAULT_SEED, config]`).
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed of the per-index allocation PDA (`[ALLOCATION_SEED, config, index_le]`).
pub const ALLOCATION_SEED: &[u8] = b"allocation";

/// Seed of the per-index position (ownership) PDA.
pub const POSITION_SEED: &[u8] = b"position";

/// Deepest Merkle proof accepted; covers trees of up to 2^32 beneficiaries.
pub const MAX_PROOF_DEPTH: usize = 32;
