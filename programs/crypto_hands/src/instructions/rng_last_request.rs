use anchor_lang::prelude::*;

use crate::state::RngState;

#[derive(Accounts)]
pub struct GetLastRequestId<'info> {
    #[account(
        seeds = [RngState::SEED],
        bump = rng_state.bump,
    )]
    pub rng_state: Account<'info, RngState>,
}

/// Most recently issued request id, 0 if none.
pub fn get_last_request_id_handler(ctx: Context<GetLastRequestId>) -> Result<u64> {
    Ok(ctx.accounts.rng_state.last_request_id)
}
