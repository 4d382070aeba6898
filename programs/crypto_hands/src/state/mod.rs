pub mod config;
pub mod player;
pub mod pool;
pub mod randomness;
pub mod tier_ledger;
pub mod wager;

pub use config::*;
pub use player::*;
pub use pool::*;
pub use randomness::*;
pub use tier_ledger::*;
pub use wager::*;
