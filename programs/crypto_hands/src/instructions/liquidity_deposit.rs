use anchor_lang::prelude::*;

use crate::events::LiquidityDeposited;
use crate::state::Pool;
use crate::utils::transfers::transfer_lamports;

#[derive(Accounts)]
pub struct DepositLiquidity<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        mut,
        seeds = [Pool::SEED],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    pub system_program: Program<'info, System>,
}

/// Anyone may add free liquidity. Deposits are not redeemable by the
/// depositor; only the pool authority can withdraw unreserved funds.
pub fn deposit_liquidity_handler(ctx: Context<DepositLiquidity>, amount: u64) -> Result<()> {
    ctx.accounts.pool.deposit(amount)?;

    transfer_lamports(
        &ctx.accounts.depositor.to_account_info(),
        &ctx.accounts.pool.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        amount,
    )?;

    let available = ctx.accounts.pool.available_lamports;
    msg!("liquidity deposited: amount={} available={}", amount, available);
    emit!(LiquidityDeposited {
        depositor: ctx.accounts.depositor.key(),
        amount,
        available,
    });

    Ok(())
}
