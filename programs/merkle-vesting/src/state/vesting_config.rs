use anchor_lang::prelude::*;

use crate::error::VestingError;

/// Singleton configuration PDA, written once by `initialize_vesting`.
#[account]
#[derive(Default, Debug)]
pub struct VestingConfig {
    /// Commitment over every `(index, account, share)` triple.
    pub merkle_root: [u8; 32],
    /// Vesting horizon length in seconds (> 0).
    pub total_vesting_duration: i64,
    /// Clock at construction (Unix seconds).
    pub vesting_start_time: i64,
    /// start + duration; independent of when positions activate.
    pub vesting_end_time: i64,
    /// Reward token mint.
    pub reward_mint: Pubkey,
    /// Reward pool token account (PDA, authority = this config).
    pub vault: Pubkey,
    /// Number of positions activated so far.
    pub activated_positions: u64,
    /// Sum of every settled amount.
    pub total_settled: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl VestingConfig {
    pub const SIZE: usize =
        32 + // merkle_root
        8 +  // total_vesting_duration
        8 +  // vesting_start_time
        8 +  // vesting_end_time
        32 + // reward_mint
        32 + // vault
        8 +  // activated_positions
        8 +  // total_settled
        1 +  // bump
        1;   // vault_bump

    pub fn schedule(&self) -> VestingSchedule {
        VestingSchedule {
            total_vesting_duration: self.total_vesting_duration,
            vesting_end_time: self.vesting_end_time,
        }
    }
}

/// The two timing fields accrual depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingSchedule {
    pub total_vesting_duration: i64,
    pub vesting_end_time: i64,
}

impl VestingSchedule {
    pub fn new(start_ts: i64, total_vesting_duration: i64) -> std::result::Result<Self, VestingError> {
        if total_vesting_duration <= 0 {
            return Err(VestingError::InvalidConfiguration);
        }
        let vesting_end_time = start_ts
            .checked_add(total_vesting_duration)
            .ok_or(VestingError::MathOverflow)?;
        Ok(Self {
            total_vesting_duration,
            vesting_end_time,
        })
    }

    pub fn effective_time(&self, now_ts: i64) -> i64 {
        now_ts.min(self.vesting_end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_duration() {
        assert!(matches!(
            VestingSchedule::new(10, 0),
            Err(VestingError::InvalidConfiguration)
        ));
        assert!(matches!(
            VestingSchedule::new(10, -5),
            Err(VestingError::InvalidConfiguration)
        ));
    }

    #[test]
    fn end_time_is_start_plus_duration() {
        let s = VestingSchedule::new(1_000, 250).unwrap();
        assert_eq!(s.vesting_end_time, 1_250);
        assert_eq!(s.effective_time(1_100), 1_100);
        assert_eq!(s.effective_time(9_999), 1_250);
    }

    #[test]
    fn end_time_overflow_is_reported() {
        assert!(matches!(
            VestingSchedule::new(i64::MAX, 1),
            Err(VestingError::MathOverflow)
        ));
    }
}
