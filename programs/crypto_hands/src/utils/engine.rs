//! Wager lifecycle transitions over plain account data.
//!
//! Instruction handlers load and persist accounts and move lamports; every
//! bookkeeping decision lives here so it can be exercised without a runtime.
//! Each transition validates everything before mutating anything.

use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;
use crate::state::*;
use crate::utils::economics::*;
use crate::utils::randomness::{derive_request_seed, outcome_for};
use crate::constants::WAGER_VERSION;

/// Arguments of `place_bet` as sent by the player.
#[derive(Clone, Copy, Debug)]
pub struct BetInput {
    pub bet_type: u8,
    pub referrer: Pubkey,
    pub stake: u64,
}

/// Accounts touched when a bet is placed.
pub struct PlaceBetState<'a> {
    pub config: &'a Config,
    pub pool: &'a mut Pool,
    pub rng: &'a mut RngState,
    pub player: &'a mut Player,
    /// Registered record of the referrer, if one was supplied.
    pub referrer: Option<&'a mut Player>,
    pub holding: &'a TierHolding,
    pub wager_key: Pubkey,
    pub wager: &'a mut Wager,
    pub request: &'a mut RandomnessRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub wager_id: u64,
    pub request_id: u64,
    pub bet_type: BetType,
    pub tier: u8,
    pub commission: u64,
    pub referrer: Pubkey,
    pub referral_bonus: u64,
    pub at_risk: u64,
    pub potential_payout: u64,
    pub seed: [u8; 32],
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BetClock {
    pub now: i64,
    pub slot: u64,
}

/// Validates a bet, books it against the pool and opens its randomness
/// request. The stake transfer itself is left to the caller.
pub fn place_bet(
    s: PlaceBetState,
    input: BetInput,
    clock: BetClock,
    wager_bump: u8,
    request_bump: u8,
) -> Result<Placement> {
    let config = s.config;

    require!(!config.is_betting_paused(), CryptoHandsError::BettingPaused);
    require!(config.is_valid_stake(input.stake), CryptoHandsError::InvalidStake);
    let bet_type = BetType::try_from(input.bet_type)?;

    let referrer = s.player.effective_referrer(input.referrer);
    let mut referrer_record = match (referrer == Pubkey::default(), s.referrer) {
        (true, _) => None,
        (false, Some(record)) => {
            require!(record.is_registered(), CryptoHandsError::InvalidReferrer);
            require_keys_eq!(record.player, referrer, CryptoHandsError::InvalidReferrer);
            Some(record)
        }
        (false, None) => return err!(CryptoHandsError::InvalidReferrer),
    };

    let tier = s.holding.highest_tier();
    let commission = commission_for_stake(config, input.stake, tier)?;
    let referral_bonus = if referrer_record.is_some() {
        referral_bonus(config, commission)?
    } else {
        0
    };
    let at_risk = input
        .stake
        .checked_sub(commission)
        .ok_or(CryptoHandsError::MathOverflow)?;
    let potential_payout = payout_for(config, at_risk, bet_type)?;

    // Fails untouched when the cover is not there.
    s.pool.book_stake(commission, referral_bonus, at_risk, potential_payout)?;

    let wager_id = s.pool.next_wager_id;
    s.pool.next_wager_id = wager_id.checked_add(1).ok_or(CryptoHandsError::MathOverflow)?;

    s.player.bind_referrer(input.referrer);
    if let Some(record) = referrer_record.as_deref_mut() {
        record.credit_referral(referral_bonus)?;
    }

    let wager = s.wager;
    wager.id = wager_id;
    wager.player = s.player.player;
    wager.referrer = referrer;
    wager.bet_type = bet_type;
    wager.status = WagerStatus::Placed;
    wager.stake = input.stake;
    wager.commission = commission;
    wager.at_risk = at_risk;
    wager.potential_payout = potential_payout;
    wager.tier_at_bet = tier;
    wager.placed_at = clock.now;
    wager.bump = wager_bump;
    wager.version = WAGER_VERSION;
    wager.assert_invariant()?;

    let request_id = s.rng.next_request_id;
    let seed = derive_request_seed(request_id, &s.wager_key, &wager.player, clock.slot, clock.now);
    let issued = s.rng.issue(s.request, s.wager_key, seed, clock.now, clock.slot, request_bump)?;
    wager.mark_requested(issued)?;

    s.player.record_wager(s.wager_key, input.stake, clock.now)?;

    Ok(Placement {
        wager_id,
        request_id: issued,
        bet_type,
        tier,
        commission,
        referrer,
        referral_bonus,
        at_risk,
        potential_payout,
        seed,
    })
}

/// Accounts touched when randomness is delivered.
pub struct ResolveState<'a> {
    pub config: &'a Config,
    pub pool: &'a mut Pool,
    pub rng: &'a mut RngState,
    pub request: &'a mut RandomnessRequest,
    pub wager_key: Pubkey,
    pub wager: &'a mut Wager,
    pub player: &'a mut Player,
    pub holding: &'a TierHolding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub roll: u16,
    pub win_bps: u16,
    pub tier: u8,
    /// Credited to the player (0 on a loss).
    pub payout: u64,
    /// Hand token tier earned by a winning stake (0 = none).
    pub mint_tier: u8,
}

/// Adapter check, then engine resolution. Tier minting is left to the caller.
pub fn fulfill_and_resolve(
    s: ResolveState,
    request_id: u64,
    randomness: [u8; 32],
    now: i64,
) -> Result<Resolution> {
    s.rng.verify(s.request, request_id)?;
    require!(s.request.maps_to(&s.wager_key), CryptoHandsError::UnknownRequest);
    require!(s.wager.is_awaiting_randomness(), CryptoHandsError::AlreadyResolved);
    require_eq!(s.wager.request_id, request_id, CryptoHandsError::UnknownRequest);
    require_keys_eq!(s.wager.player, s.player.player, CryptoHandsError::Unauthorized);

    s.rng.fulfill(s.request, request_id, randomness, now)?;

    let tier = s.holding.highest_tier();
    let win_bps = win_percentage_bps(s.config, s.wager.stake, tier);
    let (outcome, roll) = outcome_for(&randomness, win_bps);

    s.wager.mark_resolved(outcome, win_bps, roll, now)?;

    let (payout, mint_tier) = match outcome {
        Outcome::Win => {
            s.pool.settle_win(s.wager.at_risk, s.wager.potential_payout)?;
            s.player.credit_win(s.wager.potential_payout, now)?;
            (s.wager.potential_payout, tier_for_stake(s.config, s.wager.stake))
        }
        Outcome::Lose => {
            s.pool.settle_loss(s.wager.at_risk, s.wager.potential_payout)?;
            s.player.record_loss();
            (0, 0)
        }
    };

    Ok(Resolution { outcome, roll, win_bps, tier, payout, mint_tier })
}

/// Releases a wager whose randomness never arrived and withdraws its request
/// from the adapter. Returns the refund owed to the player; the transfer is
/// left to the caller.
pub fn expire(
    config: &Config,
    pool: &mut Pool,
    rng: &mut RngState,
    request: &mut RandomnessRequest,
    wager_key: Pubkey,
    wager: &mut Wager,
    player: &mut Player,
    now: i64,
) -> Result<u64> {
    require!(wager.is_awaiting_randomness(), CryptoHandsError::AlreadyResolved);
    require!(request.maps_to(&wager_key), CryptoHandsError::UnknownRequest);
    require!(
        request.has_timed_out(now, config.request_timeout_secs),
        CryptoHandsError::TimeoutNotElapsed
    );

    rng.cancel(request)?;
    wager.mark_expired(now)?;
    pool.settle_expiry(wager.at_risk, wager.potential_payout)?;
    player.record_expiry();

    Ok(wager.at_risk)
}

/// Zeroes the player's balance and books the payment. `spendable` is what
/// the pool account can release above its rent-exempt minimum.
pub fn claim(
    config: &Config,
    pool: &mut Pool,
    player: &mut Player,
    now: i64,
    spendable: u64,
) -> Result<u64> {
    require!(!config.is_claim_paused(), CryptoHandsError::ClaimPaused);

    let amount = player.claimable(now, config.vesting_delay_secs)?;
    require!(
        amount <= pool.pending_winnings_lamports && amount <= spendable,
        CryptoHandsError::InsufficientLiquidity
    );

    pool.pay_winnings(amount)?;
    player.take_winnings(now)
}

/// True once nothing is owed on `wager`, so its account may be closed.
pub fn is_closable(wager: &Wager, player: &Player) -> bool {
    match wager.status {
        WagerStatus::Resolved(Outcome::Win) => {
            player.last_claim_ts >= wager.resolved_at && player.pending_winnings == 0
        }
        status => status.is_terminal(),
    }
}
