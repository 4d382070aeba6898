use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;

/// ---------------------------------------------------------------------------
/// Pool
/// ---------------------------------------------------------------------------
///
/// Program-owned PDA that physically holds the liquidity lamports backing
/// every payout. Besides its rent-exempt minimum, every lamport held here
/// sits in exactly one accounting bucket:
///
/// - `available_lamports`        free liquidity (deposits, commission, lost stakes)
/// - `reserved_lamports`         payout cover set aside when a bet is placed
/// - `locked_stake_lamports`     at-risk stakes of unresolved wagers
/// - `pending_winnings_lamports` owed to players, waiting for `claim_winnings`
///
/// Wager transitions only move value between buckets; the sum changes only
/// on deposits, stakes, withdrawals, claims and expiry refunds.
#[account]
#[derive(Default)]
pub struct Pool {
    /// Who may withdraw unreserved liquidity.
    pub authority: Pubkey,

    /// PDA bump for deterministic re-derivation.
    pub bump: u8,

    // ─────────────────────────────
    // Accounting buckets
    // ─────────────────────────────
    pub available_lamports: u64,
    pub reserved_lamports: u64,
    pub locked_stake_lamports: u64,
    pub pending_winnings_lamports: u64,

    // ─────────────────────────────
    // Monotonic stats (analytics / audit)
    // ─────────────────────────────
    pub total_deposited: u64,
    pub total_withdrawn: u64,
    pub total_commission: u64,
    pub total_paid_out: u64,
    pub total_refunded: u64,

    /// Id handed to the next wager; also its PDA seed.
    pub next_wager_id: u64,

    /// Wagers waiting on randomness.
    pub open_wagers: u32,

    /// Versioning for future migrations.
    pub version: u8,

    /// Reserved bytes for future use.
    pub _reserved: [u8; 32],
}

impl Pool {
    pub const SEED: &'static [u8] = b"pool";
    pub const SIZE: usize =
        32 + // authority
            1  + // bump
            8  + // available_lamports
            8  + // reserved_lamports
            8  + // locked_stake_lamports
            8  + // pending_winnings_lamports
            8  + // total_deposited
            8  + // total_withdrawn
            8  + // total_commission
            8  + // total_paid_out
            8  + // total_refunded
            8  + // next_wager_id
            4  + // open_wagers
            1  + // version
            32;  // reserved

    /// Sum of every accounting bucket. Must equal the pool's lamports minus rent.
    pub fn tracked_lamports(&self) -> Result<u64> {
        self.available_lamports
            .checked_add(self.reserved_lamports)
            .and_then(|v| v.checked_add(self.locked_stake_lamports))
            .and_then(|v| v.checked_add(self.pending_winnings_lamports))
            .ok_or_else(|| error!(CryptoHandsError::MathOverflow))
    }

    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, CryptoHandsError::InvalidAmount);
        self.available_lamports = add(self.available_lamports, amount)?;
        self.total_deposited = add(self.total_deposited, amount)?;
        Ok(())
    }

    /// Administrative withdrawal, limited to liquidity nothing is counting on.
    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, CryptoHandsError::InvalidAmount);
        require!(
            self.available_lamports >= amount,
            CryptoHandsError::InsufficientLiquidity
        );
        self.available_lamports = sub(self.available_lamports, amount)?;
        self.total_withdrawn = add(self.total_withdrawn, amount)?;
        Ok(())
    }

    /// Books an incoming stake.
    ///
    /// `commission - referral_bonus` becomes free liquidity, the bonus becomes
    /// pending winnings of the referrer, `at_risk` is locked and the part of
    /// `potential_payout` not covered by the stake itself is reserved out of
    /// free liquidity. Fails without touching anything if that cover is not
    /// available.
    pub fn book_stake(
        &mut self,
        commission: u64,
        referral_bonus: u64,
        at_risk: u64,
        potential_payout: u64,
    ) -> Result<()> {
        require!(referral_bonus <= commission, CryptoHandsError::MathOverflow);
        let cover = sub(potential_payout, at_risk)?;
        let retained = sub(commission, referral_bonus)?;

        let available = add(self.available_lamports, retained)?;
        require!(available >= cover, CryptoHandsError::InsufficientLiquidity);

        self.available_lamports = sub(available, cover)?;
        self.reserved_lamports = add(self.reserved_lamports, cover)?;
        self.locked_stake_lamports = add(self.locked_stake_lamports, at_risk)?;
        self.pending_winnings_lamports = add(self.pending_winnings_lamports, referral_bonus)?;
        self.total_commission = add(self.total_commission, commission)?;
        self.open_wagers = self.open_wagers.checked_add(1).ok_or(CryptoHandsError::MathOverflow)?;
        Ok(())
    }

    /// Winner: stake and cover move into pending winnings.
    pub fn settle_win(&mut self, at_risk: u64, potential_payout: u64) -> Result<()> {
        let cover = self.release(at_risk, potential_payout)?;
        let payout = add(at_risk, cover)?;
        self.pending_winnings_lamports = add(self.pending_winnings_lamports, payout)?;
        Ok(())
    }

    /// Loser: stake and cover become free liquidity.
    pub fn settle_loss(&mut self, at_risk: u64, potential_payout: u64) -> Result<()> {
        let cover = self.release(at_risk, potential_payout)?;
        let retained = add(at_risk, cover)?;
        self.available_lamports = add(self.available_lamports, retained)?;
        Ok(())
    }

    /// Expired: cover returns to free liquidity, stake leaves the pool as a refund.
    pub fn settle_expiry(&mut self, at_risk: u64, potential_payout: u64) -> Result<()> {
        let cover = self.release(at_risk, potential_payout)?;
        self.available_lamports = add(self.available_lamports, cover)?;
        self.total_refunded = add(self.total_refunded, at_risk)?;
        Ok(())
    }

    /// Pending winnings leave the pool.
    pub fn pay_winnings(&mut self, amount: u64) -> Result<()> {
        require!(
            self.pending_winnings_lamports >= amount,
            CryptoHandsError::InsufficientLiquidity
        );
        self.pending_winnings_lamports = sub(self.pending_winnings_lamports, amount)?;
        self.total_paid_out = add(self.total_paid_out, amount)?;
        Ok(())
    }

    fn release(&mut self, at_risk: u64, potential_payout: u64) -> Result<u64> {
        let cover = sub(potential_payout, at_risk)?;
        self.locked_stake_lamports = sub(self.locked_stake_lamports, at_risk)?;
        self.reserved_lamports = sub(self.reserved_lamports, cover)?;
        self.open_wagers = self.open_wagers.saturating_sub(1);
        Ok(cover)
    }
}

fn add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or_else(|| error!(CryptoHandsError::MathOverflow))
}

fn sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or_else(|| error!(CryptoHandsError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{to_bytes, assert_err};

    #[test]
    fn test_pool_size() {
        let p = Pool::default();
        let bytes = to_bytes(&p);

        assert_eq!(
            bytes.len(),
            Pool::SIZE,
            "Pool account size mismatch: expected {}, got {}",
            Pool::SIZE,
            bytes.len()
        );
    }

    #[test]
    fn stake_without_cover_is_rejected_untouched() {
        let mut p = Pool::default();
        p.deposit(100).unwrap();

        // needs 1_000 of cover, only 100 + 50 retained available
        let res = p.book_stake(50, 0, 950, 1_950);
        assert_err(res, CryptoHandsError::InsufficientLiquidity);

        assert_eq!(p.available_lamports, 100);
        assert_eq!(p.reserved_lamports, 0);
        assert_eq!(p.locked_stake_lamports, 0);
        assert_eq!(p.open_wagers, 0);
    }

    #[test]
    fn buckets_balance_across_win_and_loss() {
        let mut p = Pool::default();
        p.deposit(10_000).unwrap();

        p.book_stake(50, 5, 950, 1_900).unwrap();
        p.book_stake(50, 0, 950, 1_900).unwrap();
        assert_eq!(p.tracked_lamports().unwrap(), 10_000 + 2 * 1_000);
        assert_eq!(p.locked_stake_lamports, 1_900);
        assert_eq!(p.reserved_lamports, 1_900);
        assert_eq!(p.pending_winnings_lamports, 5);

        p.settle_win(950, 1_900).unwrap();
        p.settle_loss(950, 1_900).unwrap();
        assert_eq!(p.tracked_lamports().unwrap(), 12_000);
        assert_eq!(p.locked_stake_lamports, 0);
        assert_eq!(p.reserved_lamports, 0);
        assert_eq!(p.pending_winnings_lamports, 1_905);
        assert_eq!(p.open_wagers, 0);

        p.pay_winnings(1_900).unwrap();
        assert_eq!(p.tracked_lamports().unwrap(), 10_100);
    }

    #[test]
    fn expiry_refunds_only_the_stake() {
        let mut p = Pool::default();
        p.deposit(5_000).unwrap();
        p.book_stake(50, 0, 950, 1_900).unwrap();

        p.settle_expiry(950, 1_900).unwrap();
        assert_eq!(p.available_lamports, 5_050);
        assert_eq!(p.tracked_lamports().unwrap(), 5_050);
        assert_eq!(p.total_refunded, 950);
    }

    #[test]
    fn withdraw_cannot_touch_reserved_cover() {
        let mut p = Pool::default();
        p.deposit(1_000).unwrap();
        p.book_stake(0, 0, 500, 1_000).unwrap();

        assert_eq!(p.available_lamports, 500);
        assert_err(p.withdraw(501), CryptoHandsError::InsufficientLiquidity);
        p.withdraw(500).unwrap();
        assert_eq!(p.available_lamports, 0);
    }
}
