use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;
use crate::events::LiquidityWithdrawn;
use crate::state::Pool;
use crate::utils::transfers::pay_from_pool;

#[derive(Accounts)]
pub struct WithdrawLiquidity<'info> {
    #[account(
        mut,
        seeds = [Pool::SEED],
        bump = pool.bump,
        has_one = authority @ CryptoHandsError::Unauthorized
    )]
    pub pool: Account<'info, Pool>,

    #[account(mut)]
    pub authority: Signer<'info>,
}

/// Withdraws free liquidity only. Reserved cover, locked stakes and
/// pending winnings cannot be touched.
pub fn withdraw_liquidity_handler(ctx: Context<WithdrawLiquidity>, amount: u64) -> Result<()> {
    ctx.accounts.pool.withdraw(amount)?;

    pay_from_pool(
        &ctx.accounts.pool.to_account_info(),
        &ctx.accounts.authority.to_account_info(),
        amount,
    )?;

    let available = ctx.accounts.pool.available_lamports;
    msg!("liquidity withdrawn: amount={} available={}", amount, available);
    emit!(LiquidityWithdrawn {
        authority: ctx.accounts.authority.key(),
        amount,
        available,
    });

    Ok(())
}
