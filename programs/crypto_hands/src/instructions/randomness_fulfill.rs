use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;
use crate::events::{RandomnessFulfilled, TierTokenMinted, WagerResolved};
use crate::state::*;
use crate::utils::accounts::create_program_pda;
use crate::utils::engine::{self, ResolveState};

#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    /// Oracle key registered in the adapter. Pays for minted hand tokens.
    #[account(mut)]
    pub oracle: Signer<'info>,

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
        constraint = rng_state.oracle_authority == oracle.key() @ CryptoHandsError::Unauthorized
    )]
    pub rng_state: Box<Account<'info, RngState>>,

    /// Matched against `request_id` by the adapter, not by seeds, so a
    /// mismatch surfaces as `UnrecognizedRequest`.
    #[account(mut)]
    pub request: Box<Account<'info, RandomnessRequest>>,

    /// Matched against the request mapping by the engine.
    #[account(mut)]
    pub wager: Box<Account<'info, Wager>>,

    #[account(
        mut,
        seeds = [Player::SEED_PREFIX, wager.player.as_ref()],
        bump = player_record.bump,
    )]
    pub player_record: Box<Account<'info, Player>>,

    #[account(
        mut,
        seeds = [TierHolding::SEED_PREFIX, wager.player.as_ref()],
        bump = holding.bump,
    )]
    pub holding: Box<Account<'info, TierHolding>>,

    #[account(
        mut,
        seeds = [TierLedger::SEED],
        bump = tier_ledger.bump,
    )]
    pub tier_ledger: Box<Account<'info, TierLedger>>,

    /// CHECK: Address of the next hand token. Created here only if the
    /// wager wins a tier; otherwise left untouched.
    #[account(
        mut,
        seeds = [TierToken::SEED_PREFIX, &tier_ledger.total_minted.to_le_bytes()],
        bump,
    )]
    pub tier_token: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn fulfill_randomness_handler(
    ctx: Context<FulfillRandomness>,
    request_id: u64,
    randomness: [u8; 32],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let wager_key = ctx.accounts.wager.key();
    let config_key = ctx.accounts.config.key();

    let a = &mut *ctx.accounts;

    let resolution = engine::fulfill_and_resolve(
        ResolveState {
            config: &a.config,
            pool: &mut a.pool,
            rng: &mut a.rng_state,
            request: &mut a.request,
            wager_key,
            wager: &mut a.wager,
            player: &mut a.player_record,
            holding: &a.holding,
        },
        request_id,
        randomness,
        now,
    )?;

    emit!(RandomnessFulfilled { request_id, randomness });

    msg!(
        "wager resolved: wager={} outcome={:?} roll={} win_bps={}",
        wager_key,
        resolution.outcome,
        resolution.roll,
        resolution.win_bps
    );
    emit!(WagerResolved {
        wager: wager_key,
        player: a.wager.player,
        outcome: resolution.outcome,
        roll: resolution.roll,
        win_bps: resolution.win_bps,
        payout: resolution.payout,
    });

    if resolution.mint_tier == 0 {
        return Ok(());
    }

    // ─────────────────────────────
    // Hand token for a winning stake
    // ─────────────────────────────
    // create_program_pda also adopts an address someone already funded.
    let token_info = a.tier_token.to_account_info();
    let token_bump = ctx.bumps.tier_token;
    let id_bytes = a.tier_ledger.total_minted.to_le_bytes();
    let signer_seeds: &[&[u8]] = &[TierToken::SEED_PREFIX, &id_bytes, &[token_bump]];

    create_program_pda(
        &a.oracle.to_account_info(),
        &token_info,
        &a.system_program.to_account_info(),
        8 + TierToken::SIZE,
        signer_seeds,
    )?;

    let mut token = TierToken::default();
    let token_id = a.tier_ledger.mint(
        &config_key,
        &mut a.holding,
        &mut token,
        resolution.mint_tier,
        wager_key,
        now,
        token_bump,
    )?;

    let mut data = token_info.try_borrow_mut_data()?;
    token.try_serialize(&mut &mut data[..])?;

    emit!(TierTokenMinted {
        token_id,
        owner: token.owner,
        tier: token.tier,
        wager: wager_key,
    });

    Ok(())
}
