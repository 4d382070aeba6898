use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;
use crate::events::WagerExpired;
use crate::state::*;
use crate::utils::engine;
use crate::utils::transfers::pay_from_pool;

/// Permissionless: once the request has timed out anyone may release the
/// wager and refund its at-risk stake to the owner.
#[derive(Accounts)]
pub struct ExpireWager<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [Pool::SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [RngState::SEED],
        bump = rng_state.bump,
    )]
    pub rng_state: Box<Account<'info, RngState>>,

    #[account(mut)]
    pub wager: Box<Account<'info, Wager>>,

    #[account(
        mut,
        seeds = [RandomnessRequest::SEED_PREFIX, &wager.request_id.to_le_bytes()],
        bump = request.bump,
    )]
    pub request: Box<Account<'info, RandomnessRequest>>,

    #[account(
        mut,
        seeds = [Player::SEED_PREFIX, wager.player.as_ref()],
        bump = player_record.bump,
    )]
    pub player_record: Box<Account<'info, Player>>,

    /// CHECK: Wager owner's wallet, receives the refund.
    #[account(
        mut,
        address = wager.player @ CryptoHandsError::Unauthorized
    )]
    pub player_wallet: UncheckedAccount<'info>,
}

pub fn expire_wager_handler(ctx: Context<ExpireWager>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let wager_key = ctx.accounts.wager.key();
    let a = &mut *ctx.accounts;

    let refund = engine::expire(
        &a.config,
        &mut a.pool,
        &mut a.rng_state,
        &mut a.request,
        wager_key,
        &mut a.wager,
        &mut a.player_record,
        now,
    )?;

    pay_from_pool(
        &a.pool.to_account_info(),
        &a.player_wallet.to_account_info(),
        refund,
    )?;

    msg!("wager expired: wager={} refund={}", wager_key, refund);
    emit!(WagerExpired {
        wager: wager_key,
        request_id: a.wager.request_id,
        player: a.wager.player,
        refund,
    });

    Ok(())
}
