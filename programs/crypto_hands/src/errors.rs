use anchor_lang::prelude::*;

#[error_code]
pub enum CryptoHandsError {
    // ─────────────────────────────
    // Wager validation
    // ─────────────────────────────
    #[msg("Stake outside the allowed range")]
    InvalidStake,

    #[msg("Invalid bet type")]
    InvalidBetType,

    #[msg("Betting paused")]
    BettingPaused,

    #[msg("Invalid referrer")]
    InvalidReferrer,

    // ─────────────────────────────
    // Randomness / resolution
    // ─────────────────────────────
    #[msg("No wager maps to this request")]
    UnknownRequest,

    #[msg("Wager already resolved")]
    AlreadyResolved,

    #[msg("Request was not issued by this adapter")]
    UnrecognizedRequest,

    #[msg("Request timeout has not elapsed")]
    TimeoutNotElapsed,

    InvalidWagerState,

    // ─────────────────────────────
    // General / Access Control
    // ─────────────────────────────
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Math overflow")]
    MathOverflow,

    InvalidAuthorityTarget,
    UnsupportedVersion,

    // ─────────────────────────────
    // Claims / liquidity
    // ─────────────────────────────
    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Vesting delay has not elapsed")]
    VestingNotElapsed,

    #[msg("Insufficient liquidity")]
    InsufficientLiquidity,

    #[msg("Claims paused")]
    ClaimPaused,

    #[msg("Invalid amount")]
    InvalidAmount,

    // ─────────────────────────────
    // Configuration
    // ─────────────────────────────
    InvalidStakeBounds,
    InvalidCommissionConfig,
    InvalidTierCurve,
    InvalidWinBands,
    InvalidWinCap,
    InvalidPayoutMultiplier,
    InvalidReferralBps,
    InvalidTierThresholds,
    InvalidVestingDelay,
    InvalidRequestTimeout,
    InvalidTier,
}
