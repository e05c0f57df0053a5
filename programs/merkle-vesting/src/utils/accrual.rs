//! Linear-in-time accrual.
//! - effective_time = min(now, vesting_end_time)
//! - claimable = floor(share * (effective_time - last_claimed_at) / duration)
//! - the settlement clock only ever moves to effective_time, never past the horizon

use crate::error::VestingError;
use crate::state::VestingSchedule;

pub fn claimable_amount(
    share: u64,
    last_claimed_at: i64,
    now_ts: i64,
    schedule: &VestingSchedule,
) -> Result<u64, VestingError> {
    let effective = schedule.effective_time(now_ts);
    let elapsed = effective
        .checked_sub(last_claimed_at)
        .ok_or(VestingError::MathOverflow)?;
    if elapsed < 0 {
        return Err(VestingError::InvalidTimestamp);
    }
    if schedule.total_vesting_duration <= 0 {
        return Err(VestingError::InvalidConfiguration);
    }
    let v = (share as u128)
        .checked_mul(elapsed as u128)
        .ok_or(VestingError::MathOverflow)?
        / (schedule.total_vesting_duration as u128);
    u64::try_from(v).map_err(|_| VestingError::MathOverflow)
}

/// Clock value a settlement at `now_ts` leaves behind.
pub fn settlement_clock(now_ts: i64, schedule: &VestingSchedule) -> i64 {
    schedule.effective_time(now_ts)
}
