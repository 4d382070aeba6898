use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::CryptoHandsError;

/// One step of the stake → base win probability function.
///
/// A band covers `[min_stake, next_band.min_stake)`; the last band is open
/// ended up to `Config::max_stake`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinBand {
    pub min_stake: u64,
    pub win_bps: u16,
}

impl WinBand {
    pub const SIZE: usize = 8 + 2;
}

/// Global configuration PDA.
///
/// Holds every parameter of the wager economics. The administrative
/// `authority` is the only key allowed to change it. This account holds no
/// lamports beyond rent.
#[account]
#[derive(Default)]
pub struct Config {
    /// Program admin authority.
    pub authority: Pubkey,

    /// 1 = betting paused, 0 = enabled.
    pub pause_bet: u8,

    /// 1 = claims paused, 0 = enabled.
    pub pause_claim: u8,

    /// Inclusive stake bounds in lamports.
    pub min_stake: u64,
    pub max_stake: u64,

    /// Commission charged on a stake before any tier discount.
    pub base_commission_bps: u16,

    /// Commission never drops below this rate, whatever the tier.
    pub min_commission_bps: u16,

    /// Discount off `base_commission_bps` for tier 1..=5 (index = tier - 1).
    pub tier_commission_discount_bps: [u16; TIER_COUNT],

    /// Bonus added to the band probability for tier 1..=5.
    pub tier_win_bonus_bps: [u16; TIER_COUNT],

    /// Minimum stake that mints a hand token of tier 1..=5 on a win.
    pub tier_thresholds: [u64; TIER_COUNT],

    /// Stake-keyed base win probability, ascending by `min_stake`.
    pub win_bands: [WinBand; WIN_BAND_COUNT],

    /// Upper bound on any win probability. Always below `PRECISION`.
    pub max_win_bps: u16,

    /// Payout as a multiple of the at-risk stake, per bet type.
    pub payout_multiplier_bps: [u32; BET_TYPE_COUNT],

    /// Share of the commission credited to the referrer.
    pub referral_bps: u16,

    /// Seconds between the last win and an allowed claim.
    pub vesting_delay_secs: i64,

    /// Seconds after which an unfulfilled request may be expired by anyone.
    pub request_timeout_secs: i64,

    /// Schema version, advanced by `migrate_config`.
    pub version: u8,

    /// PDA bump for Config.
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 32],
}

impl Config {
    pub const SEED: &'static [u8] = b"config";

    /// Serialized size excluding the 8-byte Anchor discriminator.
    pub const SIZE: usize =
        32 + // authority
            1 +  // pause_bet
            1 +  // pause_claim
            8 +  // min_stake
            8 +  // max_stake
            2 +  // base_commission_bps
            2 +  // min_commission_bps
            (2 * TIER_COUNT) + // tier_commission_discount_bps
            (2 * TIER_COUNT) + // tier_win_bonus_bps
            (8 * TIER_COUNT) + // tier_thresholds
            (WinBand::SIZE * WIN_BAND_COUNT) + // win_bands
            2 +  // max_win_bps
            (4 * BET_TYPE_COUNT) + // payout_multiplier_bps
            2 +  // referral_bps
            8 +  // vesting_delay_secs
            8 +  // request_timeout_secs
            1 +  // version
            1 +  // bump
            32;  // reserved

    /// Writes the launch parameters. Authority and bump are left untouched.
    pub fn set_defaults(&mut self) {
        self.pause_bet = 0;
        self.pause_claim = 0;

        self.min_stake = DEFAULT_MIN_STAKE;
        self.max_stake = DEFAULT_MAX_STAKE;

        self.base_commission_bps = DEFAULT_BASE_COMMISSION_BPS;
        self.min_commission_bps = DEFAULT_MIN_COMMISSION_BPS;
        self.tier_commission_discount_bps = DEFAULT_TIER_COMMISSION_DISCOUNT_BPS;

        self.tier_win_bonus_bps = DEFAULT_TIER_WIN_BONUS_BPS;
        self.tier_thresholds = DEFAULT_TIER_THRESHOLDS;

        for (i, band) in self.win_bands.iter_mut().enumerate() {
            band.min_stake = DEFAULT_WIN_BAND_MIN_STAKES[i];
            band.win_bps = DEFAULT_WIN_BAND_BPS[i];
        }
        self.max_win_bps = DEFAULT_MAX_WIN_BPS;

        self.payout_multiplier_bps = DEFAULT_PAYOUT_MULTIPLIER_BPS;
        self.referral_bps = DEFAULT_REFERRAL_BPS;

        self.vesting_delay_secs = DEFAULT_VESTING_DELAY_SECS;
        self.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;

        self.version = CONFIG_VERSION;
        self._reserved = [0; 32];
    }

    pub fn is_betting_paused(&self) -> bool {
        self.pause_bet != 0
    }

    pub fn is_claim_paused(&self) -> bool {
        self.pause_claim != 0
    }

    #[inline]
    pub fn is_valid_stake(&self, lamports: u64) -> bool {
        lamports >= self.min_stake && lamports <= self.max_stake
    }

    /// Checks every cross-field invariant the economics rely on.
    ///
    /// Called after `initialize` and after every `update_config`, so a stored
    /// Config is always one the commission and odds functions are total over.
    pub fn validate(&self) -> Result<()> {
        let denom = PRECISION as u16;

        // Stake bounds
        require!(self.min_stake > 0, CryptoHandsError::InvalidStakeBounds);
        require!(self.min_stake <= self.max_stake, CryptoHandsError::InvalidStakeBounds);

        // Commission curve: floor <= base <= 100%, discounts non-decreasing in tier
        require!(self.base_commission_bps <= denom, CryptoHandsError::InvalidCommissionConfig);
        require!(
            self.min_commission_bps <= self.base_commission_bps,
            CryptoHandsError::InvalidCommissionConfig
        );
        require!(
            is_non_decreasing(&self.tier_commission_discount_bps),
            CryptoHandsError::InvalidTierCurve
        );
        require!(
            is_non_decreasing(&self.tier_win_bonus_bps),
            CryptoHandsError::InvalidTierCurve
        );

        // Win bands: first band anchored at min_stake, strictly ascending
        // stakes, non-increasing probability.
        require_eq!(
            self.win_bands[0].min_stake,
            self.min_stake,
            CryptoHandsError::InvalidWinBands
        );
        for pair in self.win_bands.windows(2) {
            require!(pair[0].min_stake < pair[1].min_stake, CryptoHandsError::InvalidWinBands);
            require!(pair[0].win_bps >= pair[1].win_bps, CryptoHandsError::InvalidWinBands);
        }
        require!(
            self.win_bands.iter().all(|b| b.win_bps > 0),
            CryptoHandsError::InvalidWinBands
        );

        // No outcome may be a guaranteed win.
        require!(self.max_win_bps > 0, CryptoHandsError::InvalidWinCap);
        require!(self.max_win_bps < denom, CryptoHandsError::InvalidWinCap);

        require!(
            self.payout_multiplier_bps.iter().all(|m| *m as u64 >= PRECISION),
            CryptoHandsError::InvalidPayoutMultiplier
        );

        require!(self.referral_bps <= denom, CryptoHandsError::InvalidReferralBps);

        require!(self.tier_thresholds[0] > 0, CryptoHandsError::InvalidTierThresholds);
        for pair in self.tier_thresholds.windows(2) {
            require!(pair[0] < pair[1], CryptoHandsError::InvalidTierThresholds);
        }

        require!(self.vesting_delay_secs >= 0, CryptoHandsError::InvalidVestingDelay);
        require!(self.request_timeout_secs > 0, CryptoHandsError::InvalidRequestTimeout);

        Ok(())
    }

    /// Brings a Config written by an older program version up to
    /// `CONFIG_VERSION`. Returns true if anything changed.
    ///
    /// v1 had no probability cap and no referral share; both fields were
    /// carved out of the reserved tail and read as zero.
    pub fn migrate(&mut self) -> Result<bool> {
        match self.version {
            CONFIG_VERSION => Ok(false),
            1 => {
                if self.max_win_bps == 0 {
                    self.max_win_bps = DEFAULT_MAX_WIN_BPS;
                }
                if self.referral_bps == 0 {
                    self.referral_bps = DEFAULT_REFERRAL_BPS;
                }
                self.version = CONFIG_VERSION;
                self.validate()?;
                Ok(true)
            }
            _ => err!(CryptoHandsError::UnsupportedVersion),
        }
    }
}

fn is_non_decreasing(values: &[u16]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
