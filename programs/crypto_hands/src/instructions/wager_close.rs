use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;
use crate::state::*;
use crate::utils::engine::is_closable;

/// Closes a settled wager and its randomness request, returning both rents
/// to the player.
#[derive(Accounts)]
pub struct CloseWager<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        seeds = [Player::SEED_PREFIX, player.key().as_ref()],
        bump = player_record.bump,
    )]
    pub player_record: Box<Account<'info, Player>>,

    #[account(
        mut,
        has_one = player @ CryptoHandsError::Unauthorized,
        close = player
    )]
    pub wager: Box<Account<'info, Wager>>,

    #[account(
        mut,
        seeds = [RandomnessRequest::SEED_PREFIX, &wager.request_id.to_le_bytes()],
        bump = request.bump,
        close = player
    )]
    pub request: Box<Account<'info, RandomnessRequest>>,
}

pub fn close_wager_handler(ctx: Context<CloseWager>) -> Result<()> {
    let wager = &ctx.accounts.wager;

    require!(
        is_closable(wager, &ctx.accounts.player_record),
        CryptoHandsError::InvalidWagerState
    );

    msg!("wager closed: wager={} status={:?}", wager.key(), wager.status);
    Ok(())
}
