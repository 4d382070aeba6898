use anchor_lang::prelude::*;

use crate::state::Player;

/// Creates a player record ahead of the first bet. Lets a wallet that has
/// never played be named as a referrer.
#[derive(Accounts)]
#[instruction(player: Pubkey)]
pub struct RegisterPlayer<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + Player::SIZE,
        seeds = [Player::SEED_PREFIX, player.as_ref()],
        bump,
    )]
    pub player_record: Account<'info, Player>,

    pub system_program: Program<'info, System>,
}

pub fn register_player_handler(ctx: Context<RegisterPlayer>, player: Pubkey) -> Result<()> {
    ctx.accounts.player_record.register(player, ctx.bumps.player_record);
    msg!("player registered: {}", player);
    Ok(())
}
