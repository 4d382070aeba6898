use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;
use crate::events::{BetPlaced, RandomnessRequested};
use crate::state::*;
use crate::utils::accounts::create_program_pda;
use crate::utils::engine::{self, BetClock, BetInput, PlaceBetState};
use crate::utils::transfers::transfer_lamports;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

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

    #[account(
        init_if_needed,
        payer = player,
        space = 8 + Player::SIZE,
        seeds = [Player::SEED_PREFIX, player.key().as_ref()],
        bump,
        constraint = player_record.player == Pubkey::default()
            || player_record.player == player.key() @ CryptoHandsError::Unauthorized
    )]
    pub player_record: Box<Account<'info, Player>>,

    /// Hand tokens held by the player; read for commission, written on wins.
    #[account(
        init_if_needed,
        payer = player,
        space = 8 + TierHolding::SIZE,
        seeds = [TierHolding::SEED_PREFIX, player.key().as_ref()],
        bump,
        constraint = holding.owner == Pubkey::default()
            || holding.owner == player.key() @ CryptoHandsError::Unauthorized
    )]
    pub holding: Box<Account<'info, TierHolding>>,

    #[account(
        init,
        payer = player,
        space = 8 + Wager::SIZE,
        seeds = [Wager::SEED_PREFIX, &pool.next_wager_id.to_le_bytes()],
        bump,
    )]
    pub wager: Box<Account<'info, Wager>>,

    #[account(
        init,
        payer = player,
        space = 8 + RandomnessRequest::SIZE,
        seeds = [RandomnessRequest::SEED_PREFIX, &rng_state.next_request_id.to_le_bytes()],
        bump,
    )]
    pub request: Box<Account<'info, RandomnessRequest>>,

    /// CHECK: Player PDA of the bound (or about to be bound) referrer,
    /// verified and created on first referral by the handler. Required only
    /// when the player has a referrer.
    #[account(mut)]
    pub referrer_record: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
}

pub fn place_bet_handler(
    ctx: Context<PlaceBet>,
    bet_type: u8,
    referrer: Pubkey,
    stake: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let player_key = ctx.accounts.player.key();
    let wager_key = ctx.accounts.wager.key();
    let request_key = ctx.accounts.request.key();

    let a = &mut *ctx.accounts;

    // ─────────────────────────────
    // Hydrate lazily created records
    // ─────────────────────────────
    a.player_record.register(player_key, ctx.bumps.player_record);
    a.holding.register(player_key, ctx.bumps.holding);

    let effective_referrer = a.player_record.effective_referrer(referrer);
    let referrer_info = a.referrer_record.as_ref().map(|r| r.to_account_info());
    let mut referrer_record = match (&referrer_info, effective_referrer == Pubkey::default()) {
        (Some(info), false) => Some(open_referrer_record(
            &a.player.to_account_info(),
            info,
            &a.system_program.to_account_info(),
            effective_referrer,
        )?),
        _ => None,
    };

    // ─────────────────────────────
    // Engine: validate, book, request randomness
    // ─────────────────────────────
    let placement = engine::place_bet(
        PlaceBetState {
            config: &a.config,
            pool: &mut a.pool,
            rng: &mut a.rng_state,
            player: &mut a.player_record,
            referrer: referrer_record.as_mut(),
            holding: &a.holding,
            wager_key,
            wager: &mut a.wager,
            request: &mut a.request,
        },
        BetInput { bet_type, referrer, stake },
        BetClock { now: clock.unix_timestamp, slot: clock.slot },
        ctx.bumps.wager,
        ctx.bumps.request,
    )?;

    if let (Some(info), Some(record)) = (&referrer_info, &referrer_record) {
        let mut data = info.try_borrow_mut_data()?;
        record.try_serialize(&mut &mut data[..])?;
    }

    // ─────────────────────────────
    // Stake into the pool
    // ─────────────────────────────
    transfer_lamports(
        &a.player.to_account_info(),
        &a.pool.to_account_info(),
        &a.system_program.to_account_info(),
        stake,
    )?;

    msg!(
        "bet placed: wager={} id={} stake={} commission={} request={}",
        wager_key,
        placement.wager_id,
        stake,
        placement.commission,
        placement.request_id
    );

    emit!(BetPlaced {
        wager: wager_key,
        wager_id: placement.wager_id,
        player: player_key,
        bet_type: placement.bet_type,
        stake,
        commission: placement.commission,
        at_risk: placement.at_risk,
        potential_payout: placement.potential_payout,
        tier: placement.tier,
        referrer: placement.referrer,
        referral_bonus: placement.referral_bonus,
    });
    emit!(RandomnessRequested {
        request_id: placement.request_id,
        request: request_key,
        wager: wager_key,
        seed: placement.seed,
        slot: clock.slot,
    });

    Ok(())
}

/// Loads the referrer's player record, opening it if the referrer has never
/// played. The address must be the referrer's player PDA.
fn open_referrer_record<'info>(
    payer: &AccountInfo<'info>,
    record: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    referrer: Pubkey,
) -> Result<Player> {
    let (address, bump) =
        Pubkey::find_program_address(&[Player::SEED_PREFIX, referrer.as_ref()], &crate::ID);
    require_keys_eq!(record.key(), address, CryptoHandsError::InvalidReferrer);

    if record.owner == &crate::ID && record.data_len() > 0 {
        let data = record.try_borrow_data()?;
        return Player::try_deserialize(&mut &data[..]);
    }

    create_program_pda(
        payer,
        record,
        system_program,
        8 + Player::SIZE,
        &[Player::SEED_PREFIX, referrer.as_ref(), &[bump]],
    )?;
    Ok(Player::opened(referrer, bump))
}
