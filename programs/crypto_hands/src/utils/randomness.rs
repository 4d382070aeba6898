use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::constants::{PRECISION, RNG_SEED_DOMAIN};
use crate::state::Outcome;

/// Reduces 32 oracle bytes to a roll in `[0, PRECISION)`.
///
/// The bytes are read as one big-endian 256-bit integer and taken modulo
/// `PRECISION`, folding a byte at a time so nothing overflows.
pub fn roll_from_randomness(randomness: &[u8; 32]) -> u16 {
    randomness
        .iter()
        .fold(0u64, |acc, b| (acc * 256 + *b as u64) % PRECISION) as u16
}

/// Win iff `roll < win_bps`.
pub fn outcome_for(randomness: &[u8; 32], win_bps: u16) -> (Outcome, u16) {
    let roll = roll_from_randomness(randomness);
    let outcome = if roll < win_bps { Outcome::Win } else { Outcome::Lose };
    (outcome, roll)
}

/// Seed handed to the oracle with a request.
///
/// Binds the request to the wager, the player and the moment it was opened
/// so a fulfillment cannot be replayed against another request.
pub fn derive_request_seed(
    request_id: u64,
    wager: &Pubkey,
    player: &Pubkey,
    slot: u64,
    now: i64,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(RNG_SEED_DOMAIN);
    hasher.update(request_id.to_le_bytes());
    hasher.update(wager.as_ref());
    hasher.update(player.as_ref());
    hasher.update(slot.to_le_bytes());
    hasher.update(now.to_le_bytes());
    hasher.finalize().into()
}
