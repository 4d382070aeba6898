use anchor_lang::prelude::*;

use crate::constants::RECENT_WAGERS_CAP;
use crate::errors::CryptoHandsError;

#[account]
#[derive(Default)]
pub struct Player {
    /// The owner/player wallet
    pub player: Pubkey, // 32

    /// PDA bump
    pub bump: u8, // 1

    /// Referrer bound on the first wager. Default key = none.
    pub referrer: Pubkey, // 32

    // ─────────────────────────────
    // Balances
    // ─────────────────────────────
    /// Winnings and referral bonuses waiting for `claim_winnings`.
    pub pending_winnings: u64, // 8

    /// Timestamp of the most recent win; vesting counts from here.
    pub last_win_ts: i64, // 8

    /// Timestamp of the most recent successful claim.
    pub last_claim_ts: i64, // 8

    // ─────────────────────────────
    // Aggregate stats
    // ─────────────────────────────
    pub total_wagered: u64,        // 8
    pub total_bets: u64,           // 8
    pub wins: u32,                 // 4
    pub losses: u32,               // 4
    pub expired: u32,              // 4
    pub total_claimed: u64,        // 8
    pub referral_earned: u64,      // 8
    pub last_played_ts: i64,       // 8

    // ─────────────────────────────
    // Recent wagers ring buffer
    // ─────────────────────────────
    /// Circular buffer of the last N wager pubkeys
    pub recent_wagers: [Pubkey; RECENT_WAGERS_CAP], // 32 * 10 = 320

    /// Number of valid entries currently stored (0~RECENT_WAGERS_CAP)
    pub recent_wagers_len: u16, // 2

    /// Next index to write (wraps around 0..RECENT_WAGERS_CAP-1)
    pub recent_wagers_head: u16, // 2

    // ─────────────────────────────
    // Reserved for future upgrades
    // ─────────────────────────────
    pub _reserved: [u8; 16],
}

impl Player {
    pub const SEED_PREFIX: &'static [u8] = b"player";

    /// Total serialized size (not including the 8-byte discriminator)
    pub const SIZE: usize =
        32  // player
            + 1   // bump
            + 32  // referrer
            + 8   // pending_winnings
            + 8   // last_win_ts
            + 8   // last_claim_ts
            + 8   // total_wagered
            + 8   // total_bets
            + 4   // wins
            + 4   // losses
            + 4   // expired
            + 8   // total_claimed
            + 8   // referral_earned
            + 8   // last_played_ts
            + (32 * RECENT_WAGERS_CAP) // recent_wagers
            + 2   // recent_wagers_len
            + 2   // recent_wagers_head
            + 16; // reserved

    pub fn is_registered(&self) -> bool {
        self.player != Pubkey::default()
    }

    /// Hydrates a freshly created record. No-op if already owned.
    pub fn register(&mut self, player: Pubkey, bump: u8) {
        if self.is_registered() {
            return;
        }
        self.player = player;
        self.bump = bump;
        self.referrer = Pubkey::default();
        self.recent_wagers = [Pubkey::default(); RECENT_WAGERS_CAP];
        self.recent_wagers_len = 0;
        self.recent_wagers_head = 0;
        self._reserved = [0u8; 16];
    }

    /// A registered record for someone seen for the first time, such as a
    /// referrer who has never played.
    pub fn opened(player: Pubkey, bump: u8) -> Self {
        let mut record = Self::default();
        record.register(player, bump);
        record
    }

    pub fn has_referrer(&self) -> bool {
        self.referrer != Pubkey::default()
    }

    /// Returns the referrer in effect for the next wager.
    ///
    /// The first wager binds `candidate` (ignored if it is the default key or
    /// the player itself). Once bound, the referrer never changes.
    pub fn bind_referrer(&mut self, candidate: Pubkey) -> Pubkey {
        self.referrer = self.effective_referrer(candidate);
        self.referrer
    }

    /// What `bind_referrer(candidate)` would return, without binding.
    pub fn effective_referrer(&self, candidate: Pubkey) -> Pubkey {
        if self.total_bets == 0
            && !self.has_referrer()
            && candidate != Pubkey::default()
            && candidate != self.player
        {
            candidate
        } else {
            self.referrer
        }
    }

    /// Push a wager pubkey into the ring buffer (keeps only the last N)
    pub fn push_recent_wager(&mut self, wager: Pubkey) {
        let head = self.recent_wagers_head as usize;
        self.recent_wagers[head] = wager;

        let next = (head + 1) % RECENT_WAGERS_CAP;
        self.recent_wagers_head = next as u16;

        if (self.recent_wagers_len as usize) < RECENT_WAGERS_CAP {
            self.recent_wagers_len += 1;
        }
    }

    pub fn record_wager(&mut self, wager: Pubkey, stake: u64, now: i64) -> Result<()> {
        self.total_wagered = self
            .total_wagered
            .checked_add(stake)
            .ok_or(CryptoHandsError::MathOverflow)?;
        self.total_bets = self.total_bets.saturating_add(1);
        self.last_played_ts = now;
        self.push_recent_wager(wager);
        Ok(())
    }

    pub fn credit_win(&mut self, payout: u64, now: i64) -> Result<()> {
        self.pending_winnings = self
            .pending_winnings
            .checked_add(payout)
            .ok_or(CryptoHandsError::MathOverflow)?;
        self.last_win_ts = now;
        self.wins = self.wins.saturating_add(1);
        Ok(())
    }

    /// Referral bonuses are claimable alongside winnings but do not restart
    /// the vesting clock.
    pub fn credit_referral(&mut self, bonus: u64) -> Result<()> {
        self.pending_winnings = self
            .pending_winnings
            .checked_add(bonus)
            .ok_or(CryptoHandsError::MathOverflow)?;
        self.referral_earned = self.referral_earned.saturating_add(bonus);
        Ok(())
    }

    pub fn record_loss(&mut self) {
        self.losses = self.losses.saturating_add(1);
    }

    pub fn record_expiry(&mut self) {
        self.expired = self.expired.saturating_add(1);
    }

    /// Amount claimable at `now`, or the reason it is not.
    pub fn claimable(&self, now: i64, vesting_delay_secs: i64) -> Result<u64> {
        require!(self.pending_winnings > 0, CryptoHandsError::NothingToClaim);

        let elapsed = now.saturating_sub(self.last_win_ts);
        require!(elapsed >= vesting_delay_secs, CryptoHandsError::VestingNotElapsed);

        Ok(self.pending_winnings)
    }

    /// Zeroes the balance. Called before lamports leave the pool.
    pub fn take_winnings(&mut self, now: i64) -> Result<u64> {
        let amount = self.pending_winnings;
        self.pending_winnings = 0;
        self.last_claim_ts = now;
        self.total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(CryptoHandsError::MathOverflow)?;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{to_bytes, assert_err};

    fn registered() -> Player {
        let mut p = Player::default();
        p.register(Pubkey::new_unique(), 254);
        p
    }

    #[test]
    fn test_player_size() {
        let p = registered();
        let bytes = to_bytes(&p);
        assert_eq!(bytes.len(), Player::SIZE);
    }

    #[test]
    fn referrer_binds_once_on_first_wager() {
        let mut p = registered();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        assert_eq!(p.bind_referrer(first), first);
        p.record_wager(Pubkey::new_unique(), 10, 1).unwrap();

        // immutable afterwards
        assert_eq!(p.bind_referrer(second), first);
        assert_eq!(p.referrer, first);
    }

    #[test]
    fn self_referral_is_ignored() {
        let mut p = registered();
        let me = p.player;
        assert_eq!(p.bind_referrer(me), Pubkey::default());
        assert!(!p.has_referrer());
    }

    #[test]
    fn referrer_cannot_be_bound_after_first_wager() {
        let mut p = registered();
        p.record_wager(Pubkey::new_unique(), 10, 1).unwrap();
        assert_eq!(p.bind_referrer(Pubkey::new_unique()), Pubkey::default());
    }

    #[test]
    fn ring_buffer_keeps_last_entries() {
        let mut p = registered();
        let keys: Vec<Pubkey> = (0..RECENT_WAGERS_CAP + 3).map(|_| Pubkey::new_unique()).collect();
        for k in &keys {
            p.push_recent_wager(*k);
        }
        assert_eq!(p.recent_wagers_len as usize, RECENT_WAGERS_CAP);
        assert_eq!(p.recent_wagers_head, 3);
        assert_eq!(p.recent_wagers[2], keys[RECENT_WAGERS_CAP + 2]);
    }

    #[test]
    fn vesting_boundary_is_inclusive() {
        let mut p = registered();
        p.credit_win(500, 1_000).unwrap();

        assert_err(p.claimable(1_099, 100), CryptoHandsError::VestingNotElapsed);
        assert_eq!(p.claimable(1_100, 100).unwrap(), 500);
    }

    #[test]
    fn nothing_to_claim_wins_over_vesting() {
        let p = registered();
        assert_err(p.claimable(0, 100), CryptoHandsError::NothingToClaim);
    }

    #[test]
    fn referral_credit_does_not_restart_vesting() {
        let mut p = registered();
        p.credit_referral(7).unwrap();
        assert_eq!(p.last_win_ts, 0);
        assert_eq!(p.claimable(10, 5).unwrap(), 7);

        assert_eq!(p.take_winnings(10).unwrap(), 7);
        assert_eq!(p.pending_winnings, 0);
        assert_eq!(p.total_claimed, 7);
        assert_eq!(p.referral_earned, 7);
    }
}
