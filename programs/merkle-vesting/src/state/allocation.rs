use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::VestingSchedule;
use crate::utils::accrual;

/// Per-index allocation record. Exists (and is `activated`) only after a
/// successful proof; never closed.
/// Seeds: [b"allocation", config.key(), index.to_le_bytes()]
#[account]
#[derive(Default, Debug)]
pub struct Allocation {
    pub index: u64,
    /// Total owed over the full horizon; immutable once activated.
    pub share: u64,
    /// End of the last settled interval; non-decreasing, never past the horizon.
    pub last_claimed_at: i64,
    pub activated_at: i64,
    /// Cumulative amount paid for this index (<= share).
    pub total_paid: u64,
    pub activated: bool,
    pub bump: u8,
}

impl Allocation {
    pub const SIZE: usize =
        8 + // index
        8 + // share
        8 + // last_claimed_at
        8 + // activated_at
        8 + // total_paid
        1 + // activated
        1; // bump

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Starts the accrual clock at `min(now, vesting_end_time)`.
    pub fn activate(&mut self, index: u64, share: u64, now_ts: i64, schedule: &VestingSchedule) {
        let clock = accrual::settlement_clock(now_ts, schedule);
        self.index = index;
        self.share = share;
        self.last_claimed_at = clock;
        self.activated_at = now_ts;
        self.total_paid = 0;
        self.activated = true;
    }

    /// Vested but unpaid amount at `now_ts`. Unactivated records hold a zero share.
    pub fn claimable_amount(
        &self,
        now_ts: i64,
        schedule: &VestingSchedule,
    ) -> std::result::Result<u64, VestingError> {
        accrual::claimable_amount(self.share, self.last_claimed_at, now_ts, schedule)
    }

    pub fn elapsed_since_last_claim(&self, now_ts: i64) -> i64 {
        now_ts.saturating_sub(self.last_claimed_at).max(0)
    }

    /// Pays the claimable amount through `pay` and advances the clock.
    ///
    /// Nothing is written unless `pay` succeeds, so a failed transfer leaves
    /// the record exactly as it was.
    pub fn settle<F>(&mut self, now_ts: i64, schedule: &VestingSchedule, pay: F) -> Result<u64>
    where
        F: FnOnce(u64) -> Result<()>,
    {
        require!(self.activated, VestingError::PositionNotActivated);

        let amount = self.claimable_amount(now_ts, schedule)?;
        let next_clock = accrual::settlement_clock(now_ts, schedule);
        let total_paid = self
            .total_paid
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;

        pay(amount)?;

        self.last_claimed_at = next_clock;
        self.total_paid = total_paid;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_800_000_000;

    fn schedule() -> VestingSchedule {
        VestingSchedule::new(T0, 100).unwrap()
    }

    fn active(share: u64, at: i64) -> Allocation {
        let mut a = Allocation::default();
        a.activate(7, share, at, &schedule());
        a
    }

    fn settle_ok(a: &mut Allocation, now: i64) -> u64 {
        a.settle(now, &schedule(), |_| Ok(())).unwrap()
    }

    #[test]
    fn end_to_end_example() {
        let s = schedule();
        let mut a = active(1_000, T0);
        assert_eq!(a.claimable_amount(T0 + 50, &s).unwrap(), 500);

        assert_eq!(settle_ok(&mut a, T0 + 50), 500);
        assert_eq!(a.last_claimed_at, T0 + 50);

        assert_eq!(a.claimable_amount(T0 + 150, &s).unwrap(), 500);
        assert_eq!(settle_ok(&mut a, T0 + 150), 500);
        assert_eq!(a.total_paid, 1_000);
    }

    #[test]
    fn first_settlement_past_horizon_pays_full_share() {
        let mut a = active(1_000, T0);
        assert_eq!(settle_ok(&mut a, T0 + 150), 1_000);
        assert_eq!(a.last_claimed_at, T0 + 100);
    }

    #[test]
    fn second_settlement_yields_zero() {
        let mut a = active(1_000, T0);
        settle_ok(&mut a, T0 + 33);
        assert_eq!(settle_ok(&mut a, T0 + 33), 0);
    }

    #[test]
    fn clock_is_clamped_and_later_settlements_stay_defined() {
        let mut a = active(1_000, T0);
        settle_ok(&mut a, T0 + 500);
        assert_eq!(a.last_claimed_at, T0 + 100);
        assert_eq!(settle_ok(&mut a, T0 + 900), 0);
        assert_eq!(a.last_claimed_at, T0 + 100);
    }

    #[test]
    fn paid_total_never_exceeds_share() {
        let mut a = active(997, T0);
        for t in (0..=300).step_by(7) {
            settle_ok(&mut a, T0 + t);
            assert!(a.total_paid <= a.share);
        }
        assert_eq!(a.claimable_amount(T0 + 300, &schedule()).unwrap(), 0);
    }

    #[test]
    fn failed_payment_leaves_record_untouched() {
        let mut a = active(1_000, T0);
        let before = a.clone();
        let res = a.settle(T0 + 60, &schedule(), |_| Err(VestingError::TransferFailed.into()));
        assert!(res.is_err());
        assert_eq!(a.last_claimed_at, before.last_claimed_at);
        assert_eq!(a.total_paid, before.total_paid);
        assert_eq!(settle_ok(&mut a, T0 + 60), 600);
    }

    #[test]
    fn payment_sees_the_claimable_amount() {
        let mut a = active(1_000, T0);
        let mut paid = None;
        a.settle(T0 + 25, &schedule(), |amount| {
            paid = Some(amount);
            Ok(())
        })
        .unwrap();
        assert_eq!(paid, Some(250));
    }

    #[test]
    fn unactivated_reports_zero_and_cannot_settle() {
        let mut a = Allocation::default();
        assert_eq!(a.claimable_amount(T0 + 50, &schedule()).unwrap(), 0);
        assert!(a.settle(T0 + 50, &schedule(), |_| Ok(())).is_err());
    }

    #[test]
    fn late_activation_accrues_only_remaining_time() {
        let mut a = active(1_000, T0 + 40);
        assert_eq!(settle_ok(&mut a, T0 + 100), 600);

        let mut late = active(1_000, T0 + 250);
        assert_eq!(late.last_claimed_at, T0 + 100);
        assert_eq!(settle_ok(&mut late, T0 + 300), 0);
    }

    #[test]
    fn elapsed_since_last_claim_is_raw_time() {
        let mut a = active(1_000, T0);
        settle_ok(&mut a, T0 + 10);
        assert_eq!(a.elapsed_since_last_claim(T0 + 130), 120);
        assert_eq!(a.elapsed_since_last_claim(T0), 0);
    }
}
