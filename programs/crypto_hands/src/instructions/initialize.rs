use anchor_lang::prelude::*;
use crate::constants::CONFIG_VERSION;
use crate::errors::CryptoHandsError;
use crate::state::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Global config PDA.
    #[account(
        init,
        payer = authority,
        space = 8 + Config::SIZE,
        seeds = [Config::SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    /// Liquidity pool PDA backing every payout.
    #[account(
        init,
        payer = authority,
        space = 8 + Pool::SIZE,
        seeds = [Pool::SEED],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// Randomness adapter state.
    #[account(
        init,
        payer = authority,
        space = 8 + RngState::SIZE,
        seeds = [RngState::SEED],
        bump
    )]
    pub rng_state: Account<'info, RngState>,

    /// Hand-token ledger. Minting is gated on the Config PDA.
    #[account(
        init,
        payer = authority,
        space = 8 + TierLedger::SIZE,
        seeds = [TierLedger::SEED],
        bump
    )]
    pub tier_ledger: Account<'info, TierLedger>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(ctx: Context<Initialize>, oracle_authority: Pubkey) -> Result<()> {
    require!(
        oracle_authority != Pubkey::default(),
        CryptoHandsError::InvalidAuthorityTarget
    );

    let authority_key = ctx.accounts.authority.key();
    let config_key = ctx.accounts.config.key();

    // ────────────────────────────────────────────────
    // Config
    // ────────────────────────────────────────────────
    let cfg = &mut ctx.accounts.config;
    cfg.authority = authority_key;
    cfg.bump = ctx.bumps.config;
    cfg.set_defaults();
    cfg.validate()?;

    // ────────────────────────────────────────────────
    // Pool
    // ────────────────────────────────────────────────
    let pool = &mut ctx.accounts.pool;
    pool.authority = authority_key;
    pool.bump = ctx.bumps.pool;
    pool.next_wager_id = 0;
    pool.version = 1;
    pool._reserved = [0; 32];

    // ────────────────────────────────────────────────
    // Randomness adapter
    // ────────────────────────────────────────────────
    ctx.accounts
        .rng_state
        .init(oracle_authority, ctx.bumps.rng_state);

    // ────────────────────────────────────────────────
    // Tier ledger
    // ────────────────────────────────────────────────
    let ledger = &mut ctx.accounts.tier_ledger;
    ledger.minter = config_key;
    ledger.total_minted = 0;
    ledger.bump = ctx.bumps.tier_ledger;

    msg!(
        "initialized: authority={} oracle={} config_v={}",
        authority_key,
        oracle_authority,
        CONFIG_VERSION
    );

    Ok(())
}
