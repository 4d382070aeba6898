use anchor_lang::prelude::*;

use crate::constants::{MAX_TIER, PRECISION};
use crate::errors::CryptoHandsError;
use crate::state::{BetType, Config};

/// Maps a tier level to its slot in the per-tier arrays. Tier 0 = none.
#[inline]
fn tier_slot(tier: u8) -> Option<usize> {
    match tier.min(MAX_TIER) {
        0 => None,
        t => Some((t - 1) as usize),
    }
}

fn mul_div_floor(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    let v = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(CryptoHandsError::MathOverflow)?
        / denominator as u128;
    u64::try_from(v).map_err(|_| error!(CryptoHandsError::MathOverflow))
}

fn mul_div_ceil(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(CryptoHandsError::MathOverflow)?;
    let v = product.div_ceil(denominator as u128);
    u64::try_from(v).map_err(|_| error!(CryptoHandsError::MathOverflow))
}

/// Effective commission rate for a holder of `tier`.
///
/// Base rate minus the tier discount, never below the configured floor.
pub fn commission_rate_bps(config: &Config, tier: u8) -> u16 {
    let discount = tier_slot(tier)
        .map(|i| config.tier_commission_discount_bps[i])
        .unwrap_or(0);

    config
        .base_commission_bps
        .saturating_sub(discount)
        .max(config.min_commission_bps)
}

/// Commission taken from `stake` for a holder of `tier`.
///
/// Rounded up so the pool never under-collects. Always in
/// `[ceil(stake * min_rate), stake]`.
pub fn commission_for_stake(config: &Config, stake: u64, tier: u8) -> Result<u64> {
    let rate = commission_rate_bps(config, tier) as u64;
    let commission = mul_div_ceil(stake, rate.min(PRECISION), PRECISION)?;
    Ok(commission.min(stake))
}

/// Base win probability of the band `stake` falls in.
///
/// Bands are closed on their lower bound. Stakes below the first band (not
/// reachable through `place_bet`) use the first band.
pub fn base_win_bps(config: &Config, stake: u64) -> u16 {
    config
        .win_bands
        .iter()
        .rev()
        .find(|band| stake >= band.min_stake)
        .unwrap_or(&config.win_bands[0])
        .win_bps
}

/// Win probability in bps for `stake` at `tier`.
///
/// Band probability plus the tier bonus, capped at `max_win_bps` and always
/// strictly below `PRECISION`.
pub fn win_percentage_bps(config: &Config, stake: u64, tier: u8) -> u16 {
    let bonus = tier_slot(tier)
        .map(|i| config.tier_win_bonus_bps[i])
        .unwrap_or(0);

    base_win_bps(config, stake)
        .saturating_add(bonus)
        .min(config.max_win_bps)
        .min((PRECISION - 1) as u16)
}

/// Lamports credited on a win. Rounded down (pool side).
pub fn payout_for(config: &Config, at_risk: u64, bet_type: BetType) -> Result<u64> {
    let multiplier = config.payout_multiplier_bps[bet_type.index()] as u64;
    mul_div_floor(at_risk, multiplier, PRECISION)
}

/// Referrer's share of `commission`. Rounded down (pool side).
pub fn referral_bonus(config: &Config, commission: u64) -> Result<u64> {
    mul_div_floor(commission, config.referral_bps as u64, PRECISION)
}

/// Tier of the hand token a winning `stake` earns. 0 = below every threshold.
pub fn tier_for_stake(config: &Config, stake: u64) -> u8 {
    config
        .tier_thresholds
        .iter()
        .take_while(|threshold| stake >= **threshold)
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::test_utils::default_config;

    const STAKES: [u64; 9] = [
        DEFAULT_MIN_STAKE,
        DEFAULT_MIN_STAKE + 1,
        99_999_999,
        100_000_000,
        333_333_333,
        1_000_000_000,
        4_999_999_999,
        5_000_000_000,
        DEFAULT_MAX_STAKE,
    ];

    #[test]
    fn commission_is_bounded_and_non_increasing_in_tier() {
        let cfg = default_config();
        for stake in STAKES {
            let floor = (stake as u128 * cfg.min_commission_bps as u128).div_ceil(PRECISION as u128) as u64;
            let mut prev = u64::MAX;
            for tier in 0..=MAX_TIER {
                let c = commission_for_stake(&cfg, stake, tier).unwrap();
                assert!(c >= floor, "stake {stake} tier {tier}: {c} < floor {floor}");
                assert!(c <= stake);
                assert!(c <= prev, "commission rose with tier at stake {stake}");
                prev = c;
            }
        }
    }

    #[test]
    fn commission_rounds_up() {
        let cfg = default_config();
        // 5% of 10_000_001 = 500_000.05 -> 500_001
        assert_eq!(commission_for_stake(&cfg, 10_000_001, 0).unwrap(), 500_001);
        assert_eq!(commission_for_stake(&cfg, DEFAULT_MIN_STAKE, 0).unwrap(), 500_000);
    }

    #[test]
    fn commission_discount_stops_at_floor() {
        let mut cfg = default_config();
        cfg.tier_commission_discount_bps = [100, 200, 300, 400, 500];
        assert_eq!(commission_rate_bps(&cfg, 5), cfg.min_commission_bps);
        assert_eq!(commission_rate_bps(&cfg, 2), 300);
        // out-of-range tiers clamp to the top tier
        assert_eq!(commission_rate_bps(&cfg, 200), cfg.min_commission_bps);
    }

    #[test]
    fn win_bps_below_certainty_and_non_decreasing_in_tier() {
        let mut cfg = default_config();
        cfg.max_win_bps = (PRECISION - 1) as u16;
        cfg.tier_win_bonus_bps = [1_000, 3_000, 5_000, 7_000, 9_000];

        for stake in STAKES {
            let mut prev = 0u16;
            for tier in 0..=MAX_TIER {
                let p = win_percentage_bps(&cfg, stake, tier);
                assert!((p as u64) < PRECISION);
                assert!(p >= prev, "win bps dropped with tier at stake {stake}");
                prev = p;
            }
        }
    }

    #[test]
    fn bands_are_closed_on_the_lower_bound() {
        let cfg = default_config();
        assert_eq!(base_win_bps(&cfg, DEFAULT_MIN_STAKE), 4_500);
        assert_eq!(base_win_bps(&cfg, 99_999_999), 4_500);
        assert_eq!(base_win_bps(&cfg, 100_000_000), 4_000);
        assert_eq!(base_win_bps(&cfg, 999_999_999), 4_000);
        assert_eq!(base_win_bps(&cfg, 1_000_000_000), 3_500);
        assert_eq!(base_win_bps(&cfg, 5_000_000_000), 3_000);
        assert_eq!(base_win_bps(&cfg, DEFAULT_MAX_STAKE), 3_000);
    }

    #[test]
    fn larger_stakes_never_have_better_base_odds() {
        let cfg = default_config();
        let mut prev = u16::MAX;
        for stake in STAKES {
            let p = base_win_bps(&cfg, stake);
            assert!(p <= prev);
            prev = p;
        }
    }

    #[test]
    fn tier_bonus_respects_cap() {
        let cfg = default_config();
        // 4_500 + 250 = 4_750 under the 4_900 cap
        assert_eq!(win_percentage_bps(&cfg, DEFAULT_MIN_STAKE, 5), 4_750);

        let mut capped = default_config();
        capped.max_win_bps = 4_600;
        assert_eq!(win_percentage_bps(&capped, DEFAULT_MIN_STAKE, 5), 4_600);
        assert_eq!(win_percentage_bps(&capped, DEFAULT_MIN_STAKE, 1), 4_550);
    }

    #[test]
    fn payout_and_referral_round_down() {
        let mut cfg = default_config();
        cfg.payout_multiplier_bps = [15_000, 20_000, 25_000];
        assert_eq!(payout_for(&cfg, 3, BetType::Rock).unwrap(), 4);
        assert_eq!(payout_for(&cfg, 9_500_000, BetType::Paper).unwrap(), 19_000_000);
        assert_eq!(payout_for(&cfg, 3, BetType::Scissors).unwrap(), 7);

        assert_eq!(referral_bonus(&cfg, 500_001).unwrap(), 50_000);
        assert_eq!(referral_bonus(&cfg, 9).unwrap(), 0);
    }

    #[test]
    fn tier_for_stake_counts_crossed_thresholds() {
        let cfg = default_config();
        assert_eq!(tier_for_stake(&cfg, DEFAULT_MIN_STAKE), 0);
        assert_eq!(tier_for_stake(&cfg, 100_000_000), 1);
        assert_eq!(tier_for_stake(&cfg, 499_999_999), 1);
        assert_eq!(tier_for_stake(&cfg, 1_000_000_000), 3);
        assert_eq!(tier_for_stake(&cfg, DEFAULT_MAX_STAKE), 5);
    }
}
