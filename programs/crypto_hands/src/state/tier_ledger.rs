use anchor_lang::prelude::*;

use crate::constants::{MAX_TIER, TIER_COUNT};
use crate::errors::CryptoHandsError;

/// Hand-token ledger PDA.
///
/// Independent store of tier ownership. The engine reads holdings to price
/// commission and odds; the only write path is `mint`, gated on the
/// `minter` capability (the Config PDA).
#[account]
#[derive(Default)]
pub struct TierLedger {
    /// Only this key may mint.
    pub minter: Pubkey,

    /// Id of the next token; also its PDA seed.
    pub total_minted: u64,

    /// Tokens minted per tier (index = tier - 1).
    pub minted_per_tier: [u64; TIER_COUNT],

    pub bump: u8,

    pub _reserved: [u8; 16],
}

impl TierLedger {
    pub const SEED: &'static [u8] = b"tier_ledger";

    pub const SIZE: usize =
        32 + // minter
            8 +  // total_minted
            (8 * TIER_COUNT) + // minted_per_tier
            1 +  // bump
            16;  // reserved

    /// Creates token `total_minted` for `holding.owner`. Returns the token id.
    ///
    /// `caller` is a capability, not a signature: `fulfill_randomness` passes
    /// the Config PDA, which always matches `minter`. The check keeps the
    /// ledger closed to any other program path that might be given a
    /// mutable ledger later, such as a CPI entrypoint.
    pub fn mint(
        &mut self,
        caller: &Pubkey,
        holding: &mut TierHolding,
        token: &mut TierToken,
        tier: u8,
        wager: Pubkey,
        now: i64,
        token_bump: u8,
    ) -> Result<u64> {
        require_keys_eq!(*caller, self.minter, CryptoHandsError::Unauthorized);
        require!(tier >= 1 && tier <= MAX_TIER, CryptoHandsError::InvalidTier);
        require!(holding.owner != Pubkey::default(), CryptoHandsError::Unauthorized);

        let id = self.total_minted;

        token.id = id;
        token.owner = holding.owner;
        token.tier = tier;
        token.minted_at = now;
        token.wager = wager;
        token.bump = token_bump;

        holding.record_mint(tier, now)?;

        let slot = &mut self.minted_per_tier[(tier - 1) as usize];
        *slot = slot.checked_add(1).ok_or(CryptoHandsError::MathOverflow)?;
        self.total_minted = id.checked_add(1).ok_or(CryptoHandsError::MathOverflow)?;

        Ok(id)
    }
}

/// Per-account view over the tokens an owner holds.
///
/// Seeds: `["tier_holding", owner]`
#[account]
#[derive(Default)]
pub struct TierHolding {
    pub owner: Pubkey,

    /// Tokens held per tier (index = tier - 1).
    pub count_per_tier: [u32; TIER_COUNT],

    /// Derived: highest tier with a non-zero count (0 = none).
    pub highest_tier: u8,

    /// Derived: sum of `count_per_tier`.
    pub token_count: u32,

    pub last_minted_at: i64,

    pub bump: u8,
}

impl TierHolding {
    pub const SEED_PREFIX: &'static [u8] = b"tier_holding";

    pub const SIZE: usize =
        32 + // owner
            (4 * TIER_COUNT) + // count_per_tier
            1 +  // highest_tier
            4 +  // token_count
            8 +  // last_minted_at
            1;   // bump

    pub fn register(&mut self, owner: Pubkey, bump: u8) {
        if self.owner != Pubkey::default() {
            return;
        }
        self.owner = owner;
        self.bump = bump;
    }

    pub fn highest_tier(&self) -> u8 {
        self.highest_tier
    }

    pub fn token_count(&self) -> u32 {
        self.token_count
    }

    fn record_mint(&mut self, tier: u8, now: i64) -> Result<()> {
        let slot = &mut self.count_per_tier[(tier - 1) as usize];
        *slot = slot.checked_add(1).ok_or(CryptoHandsError::MathOverflow)?;
        self.last_minted_at = now;
        self.refresh();
        Ok(())
    }

    /// Recomputes the derived fields from `count_per_tier`.
    pub fn refresh(&mut self) {
        self.token_count = self.count_per_tier.iter().fold(0u32, |acc, c| acc.saturating_add(*c));
        self.highest_tier = self
            .count_per_tier
            .iter()
            .rposition(|c| *c > 0)
            .map(|i| (i + 1) as u8)
            .unwrap_or(0);
    }
}

/// A single hand token. Tier is fixed at mint.
///
/// Seeds: `["tier_token", id.to_le_bytes()]`
#[account]
#[derive(Default)]
pub struct TierToken {
    pub id: u64,
    pub owner: Pubkey,
    pub tier: u8,
    pub minted_at: i64,

    /// Winning wager that produced the token.
    pub wager: Pubkey,

    pub bump: u8,
}

impl TierToken {
    pub const SEED_PREFIX: &'static [u8] = b"tier_token";

    pub const SIZE: usize =
        8 +  // id
            32 + // owner
            1 +  // tier
            8 +  // minted_at
            32 + // wager
            1;   // bump
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{to_bytes, assert_err};

    fn setup() -> (TierLedger, Pubkey, TierHolding) {
        let minter = Pubkey::new_unique();
        let ledger = TierLedger { minter, ..Default::default() };
        let mut holding = TierHolding::default();
        holding.register(Pubkey::new_unique(), 250);
        (ledger, minter, holding)
    }

    #[test]
    fn test_sizes() {
        assert_eq!(to_bytes(&TierLedger::default()).len(), TierLedger::SIZE);
        assert_eq!(to_bytes(&TierHolding::default()).len(), TierHolding::SIZE);
        assert_eq!(to_bytes(&TierToken::default()).len(), TierToken::SIZE);
    }

    #[test]
    fn mint_requires_minter_capability() {
        let (mut ledger, _, mut holding) = setup();
        let mut token = TierToken::default();
        let stranger = Pubkey::new_unique();

        let res = ledger.mint(&stranger, &mut holding, &mut token, 2, Pubkey::new_unique(), 1, 1);
        assert_err(res, CryptoHandsError::Unauthorized);
        assert_eq!(ledger.total_minted, 0);
        assert_eq!(holding.token_count(), 0);
    }

    #[test]
    fn mint_rejects_out_of_range_tier() {
        let (mut ledger, minter, mut holding) = setup();
        let mut token = TierToken::default();
        assert_err(
            ledger.mint(&minter, &mut holding, &mut token, 0, Pubkey::new_unique(), 1, 1),
            CryptoHandsError::InvalidTier,
        );
        assert_err(
            ledger.mint(&minter, &mut holding, &mut token, MAX_TIER + 1, Pubkey::new_unique(), 1, 1),
            CryptoHandsError::InvalidTier,
        );
    }

    #[test]
    fn views_track_highest_tier_and_count() {
        let (mut ledger, minter, mut holding) = setup();
        assert_eq!(holding.highest_tier(), 0);

        for (i, tier) in [2u8, 4, 1].iter().enumerate() {
            let mut token = TierToken::default();
            let id = ledger
                .mint(&minter, &mut holding, &mut token, *tier, Pubkey::new_unique(), 10 + i as i64, 1)
                .unwrap();
            assert_eq!(id, i as u64);
            assert_eq!(token.owner, holding.owner);
            assert_eq!(token.tier, *tier);
        }

        assert_eq!(holding.token_count(), 3);
        assert_eq!(holding.highest_tier(), 4);
        assert_eq!(holding.last_minted_at, 12);
        assert_eq!(ledger.total_minted, 3);
        assert_eq!(ledger.minted_per_tier, [1, 1, 0, 1, 0]);
    }
}
