use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;

/// The hand a player throws. The value selects the payout multiplier.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BetType {
    #[default]
    Rock,
    Paper,
    Scissors,
}

impl BetType {
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for BetType {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(BetType::Rock),
            1 => Ok(BetType::Paper),
            2 => Ok(BetType::Scissors),
            _ => err!(CryptoHandsError::InvalidBetType),
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

/// Wager lifecycle.
///
/// ```text
/// Placed -> RandomnessRequested -> Resolved(Win)  -> Claimed
///                               -> Resolved(Lose)
///                               -> Expired
/// ```
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WagerStatus {
    #[default]
    Placed,
    RandomnessRequested,
    Resolved(Outcome),
    Claimed,
    Expired,
}

impl WagerStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WagerStatus::Resolved(Outcome::Lose) | WagerStatus::Claimed | WagerStatus::Expired
        )
    }
}

/// ---------------------------------------------------------------------------
/// Wager
/// ---------------------------------------------------------------------------
/// One staked throw. The stake is split at placement into the commission
/// (kept by the pool) and the at-risk amount, which stays locked until the
/// wager resolves or expires.
#[account]
#[derive(Default)]
pub struct Wager {
    /// Sequential id, also the PDA seed.
    pub id: u64,

    /// Player wallet.
    pub player: Pubkey,

    /// Referrer in effect when the wager was placed (default key = none).
    pub referrer: Pubkey,

    pub bet_type: BetType,
    pub status: WagerStatus,

    /// Gross lamports sent by the player.
    pub stake: u64,

    /// Commission taken at placement (includes any referral bonus).
    pub commission: u64,

    /// Invariant: stake == commission + at_risk
    pub at_risk: u64,

    /// Credited to the player on a win. Fixed at placement.
    pub potential_payout: u64,

    /// Highest tier the player held when the wager was placed.
    pub tier_at_bet: u8,

    /// Randomness request feeding this wager.
    pub request_id: u64,

    /// Win threshold (bps) and roll used at resolution.
    pub win_bps: u16,
    pub roll: u16,

    pub placed_at: i64,
    pub resolved_at: i64,

    /// PDA bump.
    pub bump: u8,

    /// Version marker for decoding & future migrations.
    pub version: u8,

    /// Reserved for future use.
    pub _reserved: [u8; 16],
}

impl Wager {
    pub const SEED_PREFIX: &'static [u8] = b"wager";

    /// Space excluding the 8-byte discriminator. Enums are sized at their
    /// largest variant (`Resolved(_)` = tag + payload).
    pub const SIZE: usize =
        8 +  // id
            32 + // player
            32 + // referrer
            1 +  // bet_type
            2 +  // status
            8 +  // stake
            8 +  // commission
            8 +  // at_risk
            8 +  // potential_payout
            1 +  // tier_at_bet
            8 +  // request_id
            2 +  // win_bps
            2 +  // roll
            8 +  // placed_at
            8 +  // resolved_at
            1 +  // bump
            1 +  // version
            16;  // _reserved

    pub fn assert_invariant(&self) -> Result<()> {
        require!(
            self.commission.checked_add(self.at_risk) == Some(self.stake),
            CryptoHandsError::MathOverflow
        );
        require!(self.potential_payout >= self.at_risk, CryptoHandsError::MathOverflow);
        Ok(())
    }

    pub fn is_awaiting_randomness(&self) -> bool {
        self.status == WagerStatus::RandomnessRequested
    }

    /// Placed -> RandomnessRequested
    pub fn mark_requested(&mut self, request_id: u64) -> Result<()> {
        require!(self.status == WagerStatus::Placed, CryptoHandsError::InvalidWagerState);
        self.request_id = request_id;
        self.status = WagerStatus::RandomnessRequested;
        Ok(())
    }

    /// RandomnessRequested -> Resolved(outcome)
    pub fn mark_resolved(&mut self, outcome: Outcome, win_bps: u16, roll: u16, now: i64) -> Result<()> {
        require!(self.is_awaiting_randomness(), CryptoHandsError::AlreadyResolved);
        self.status = WagerStatus::Resolved(outcome);
        self.win_bps = win_bps;
        self.roll = roll;
        self.resolved_at = now;
        Ok(())
    }

    /// RandomnessRequested -> Expired
    pub fn mark_expired(&mut self, now: i64) -> Result<()> {
        require!(self.is_awaiting_randomness(), CryptoHandsError::AlreadyResolved);
        self.status = WagerStatus::Expired;
        self.resolved_at = now;
        Ok(())
    }

    /// Resolved(Win) -> Claimed
    pub fn mark_claimed(&mut self) -> Result<()> {
        require!(
            self.status == WagerStatus::Resolved(Outcome::Win),
            CryptoHandsError::InvalidWagerState
        );
        self.status = WagerStatus::Claimed;
        Ok(())
    }
}
