pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Fixed denominator for commission, win probability and payout multipliers.
pub const PRECISION: u64 = 10_000;

/// Number of tier levels a hand token can carry (1..=MAX_TIER, 0 = none).
pub const MAX_TIER: u8 = 5;
pub const TIER_COUNT: usize = MAX_TIER as usize;

/// Number of win-probability bands keyed by stake size.
pub const WIN_BAND_COUNT: usize = 4;

/// Rock, Paper, Scissors.
pub const BET_TYPE_COUNT: usize = 3;

/// How many recent wager pubkeys to keep in the player record
pub const RECENT_WAGERS_CAP: usize = 10;

/// Domain tag mixed into every oracle request seed.
pub const RNG_SEED_DOMAIN: &[u8] = b"CRYPTO_HANDS_RNG_V1";

pub const CONFIG_VERSION: u8 = 2;
pub const WAGER_VERSION: u8 = 1;

// ─────────────────────────────
// Defaults written by `initialize`
// ─────────────────────────────
pub const DEFAULT_MIN_STAKE: u64 = 10_000_000;            // 0.01 SOL
pub const DEFAULT_MAX_STAKE: u64 = 10_000_000_000;        // 10 SOL

pub const DEFAULT_BASE_COMMISSION_BPS: u16 = 500;         // 5%
pub const DEFAULT_MIN_COMMISSION_BPS: u16 = 200;          // 2%
pub const DEFAULT_TIER_COMMISSION_DISCOUNT_BPS: [u16; TIER_COUNT] = [50, 100, 150, 200, 300];

pub const DEFAULT_WIN_BAND_MIN_STAKES: [u64; WIN_BAND_COUNT] = [
    10_000_000,     // 0.01 SOL
    100_000_000,    // 0.1 SOL
    1_000_000_000,  // 1 SOL
    5_000_000_000,  // 5 SOL
];
pub const DEFAULT_WIN_BAND_BPS: [u16; WIN_BAND_COUNT] = [4_500, 4_000, 3_500, 3_000];
pub const DEFAULT_TIER_WIN_BONUS_BPS: [u16; TIER_COUNT] = [50, 100, 150, 200, 250];
pub const DEFAULT_MAX_WIN_BPS: u16 = 4_900;

pub const DEFAULT_PAYOUT_MULTIPLIER_BPS: [u32; BET_TYPE_COUNT] = [20_000, 20_000, 20_000]; // 2x

pub const DEFAULT_REFERRAL_BPS: u16 = 1_000;              // 10% of commission

pub const DEFAULT_VESTING_DELAY_SECS: i64 = 86_400;       // 1 day
pub const DEFAULT_REQUEST_TIMEOUT_SECS: i64 = 3_600;      // 1 hour

pub const DEFAULT_TIER_THRESHOLDS: [u64; TIER_COUNT] = [
    100_000_000,    // 0.1 SOL
    500_000_000,    // 0.5 SOL
    1_000_000_000,  // 1 SOL
    5_000_000_000,  // 5 SOL
    10_000_000_000, // 10 SOL
];
