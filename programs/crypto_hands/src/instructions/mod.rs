pub mod bet_place;
pub mod config_migrate;
pub mod config_update;
pub mod initialize;
pub mod liquidity_deposit;
pub mod liquidity_withdraw;
pub mod player_register;
pub mod randomness_fulfill;
pub mod rng_last_request;
pub mod tier_summary;
pub mod wager_close;
pub mod wager_expire;
pub mod winnings_claim;

pub use bet_place::*;
pub use config_migrate::*;
pub use config_update::*;
pub use initialize::*;
pub use liquidity_deposit::*;
pub use liquidity_withdraw::*;
pub use player_register::*;
pub use randomness_fulfill::*;
pub use rng_last_request::*;
pub use tier_summary::*;
pub use wager_close::*;
pub use wager_expire::*;
pub use winnings_claim::*;
