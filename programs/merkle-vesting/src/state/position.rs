use anchor_lang::prelude::*;

use crate::error::VestingError;

/// Ownership record of one transferable position.
/// Seeds: [b"position", config.key(), index.to_le_bytes()]
#[account]
#[derive(Default, Debug)]
pub struct Position {
    pub index: u64,
    /// Current holder; receives every future settlement.
    pub holder: Pubkey,
    pub bump: u8,
}

impl Position {
    pub const SIZE: usize =
        8 +  // index
        32 + // holder
        1; // bump

    pub fn mint(&mut self, index: u64, holder: Pubkey) {
        self.index = index;
        self.holder = holder;
    }

    pub fn exists(&self) -> bool {
        self.holder != Pubkey::default()
    }

    pub fn owner_of(&self) -> std::result::Result<Pubkey, VestingError> {
        if !self.exists() {
            return Err(VestingError::PositionNotActivated);
        }
        Ok(self.holder)
    }

    /// Plain ownership change with no settlement; only reachable through
    /// `transfer_with_settlement`.
    pub(crate) fn base_transfer(
        &mut self,
        from: Pubkey,
        to: Pubkey,
    ) -> std::result::Result<(), VestingError> {
        if self.owner_of()? != from {
            return Err(VestingError::NotPositionHolder);
        }
        if to == Pubkey::default() {
            return Err(VestingError::InvalidPubkey);
        }
        self.holder = to;
        Ok(())
    }
}
