use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;
use crate::events::WinningsClaimed;
use crate::state::*;
use crate::utils::engine;
use crate::utils::transfers::{pay_from_pool, pool_spendable};

/// Pays out everything the player is owed once vesting has elapsed.
///
/// The balance is paid from `player_record` alone; wagers are not needed to
/// claim. Winning wagers passed as remaining accounts (writable, owned by the
/// signer) are stamped `Claimed`, and any left out keep `Resolved(Win)`.
/// `close_wager` accepts either once nothing is owed.
#[derive(Accounts)]
pub struct ClaimWinnings<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    /// Pool holding lamports for all payouts.
    #[account(
        mut,
        seeds = [Pool::SEED],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [Player::SEED_PREFIX, claimer.key().as_ref()],
        bump = player_record.bump,
        constraint = player_record.player == claimer.key() @ CryptoHandsError::Unauthorized
    )]
    pub player_record: Box<Account<'info, Player>>,

    /// Wallet receiving the payout.
    #[account(mut)]
    pub claimer: Signer<'info>,
}

pub fn claim_winnings_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ClaimWinnings<'info>>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let claimer_key = ctx.accounts.claimer.key();
    let a = &mut *ctx.accounts;

    let pool_info = a.pool.to_account_info();
    let spendable = pool_spendable(&pool_info, 8 + Pool::SIZE)?;

    // Books settle before any lamport moves.
    let amount = engine::claim(&a.config, &mut a.pool, &mut a.player_record, now, spendable)?;

    pay_from_pool(&pool_info, &a.claimer.to_account_info(), amount)?;

    // ─────────────────────────────
    // Stamp settled winning wagers
    // ─────────────────────────────
    for info in ctx.remaining_accounts.iter() {
        let mut wager = Account::<Wager>::try_from(info)?;
        require_keys_eq!(wager.player, claimer_key, CryptoHandsError::Unauthorized);
        if wager.status == WagerStatus::Resolved(Outcome::Win) {
            wager.mark_claimed()?;
            wager.exit(&crate::ID)?;
        }
    }

    msg!("winnings claimed: player={} amount={}", claimer_key, amount);
    emit!(WinningsClaimed {
        player: claimer_key,
        amount,
        claimed_at: now,
    });

    Ok(())
}
