use anchor_lang::prelude::*;

use crate::state::{BetType, Outcome};

#[event]
pub struct BetPlaced {
    pub wager: Pubkey,
    pub wager_id: u64,
    pub player: Pubkey,
    pub bet_type: BetType,
    pub stake: u64,
    pub commission: u64,
    pub at_risk: u64,
    pub potential_payout: u64,
    pub tier: u8,
    pub referrer: Pubkey,
    pub referral_bonus: u64,
}

/// Watched by the off-chain oracle.
#[event]
pub struct RandomnessRequested {
    pub request_id: u64,
    pub request: Pubkey,
    pub wager: Pubkey,
    pub seed: [u8; 32],
    pub slot: u64,
}

#[event]
pub struct RandomnessFulfilled {
    pub request_id: u64,
    pub randomness: [u8; 32],
}

#[event]
pub struct WagerResolved {
    pub wager: Pubkey,
    pub player: Pubkey,
    pub outcome: Outcome,
    pub roll: u16,
    pub win_bps: u16,
    pub payout: u64,
}

#[event]
pub struct TierTokenMinted {
    pub token_id: u64,
    pub owner: Pubkey,
    pub tier: u8,
    pub wager: Pubkey,
}

#[event]
pub struct WinningsClaimed {
    pub player: Pubkey,
    pub amount: u64,
    pub claimed_at: i64,
}

#[event]
pub struct WagerExpired {
    pub wager: Pubkey,
    pub request_id: u64,
    pub player: Pubkey,
    pub refund: u64,
}

#[event]
pub struct LiquidityDeposited {
    pub depositor: Pubkey,
    pub amount: u64,
    pub available: u64,
}

#[event]
pub struct LiquidityWithdrawn {
    pub authority: Pubkey,
    pub amount: u64,
    pub available: u64,
}

#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
}

#[event]
pub struct ConfigMigrated {
    pub version: u8,
}
