pub mod claim;
pub mod fund_pool;
pub mod get_claimable_amount;
pub mod initialize_vesting;
pub mod inspect_position;
pub mod settle_position;
pub mod transfer_position;

// Handlers are crate-visible only and called by path from `lib.rs`; the globs
// publish account contexts, events, return types and the client modules that
// `#[program]` resolves from the crate root.
pub use claim::*;
pub use fund_pool::*;
pub use get_claimable_amount::*;
pub use initialize_vesting::*;
pub use inspect_position::*;
pub use settle_position::*;
pub use transfer_position::*;
