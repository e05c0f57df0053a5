pub mod allocation;
pub mod position;
pub mod vesting_config;

pub use allocation::*;
pub use position::*;
pub use vesting_config::*;
