use anchor_lang::prelude::*;
use crate::constants::{BET_TYPE_COUNT, TIER_COUNT, WIN_BAND_COUNT};
use crate::errors::CryptoHandsError;
use crate::events::ConfigUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Global Config PDA.
    /// Only the `authority` stored in Config is allowed to update it.
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ CryptoHandsError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    /// Adapter state; holds the oracle key.
    #[account(
        mut,
        seeds = [RngState::SEED],
        bump = rng_state.bump
    )]
    pub rng_state: Account<'info, RngState>,

    /// Pool authority follows the config authority.
    #[account(
        mut,
        seeds = [Pool::SEED],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Current program authority.
    ///
    /// Must match `config.authority` due to the `has_one` constraint above.
    pub authority: Signer<'info>,
}

/// Patch for the global configuration.
///
/// Every field is optional; `None` leaves the stored value unchanged.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct ConfigUpdateArgs {
    pub pause_bet: Option<u8>,
    pub pause_claim: Option<u8>,
    pub new_authority: Option<Pubkey>,
    pub new_oracle_authority: Option<Pubkey>,

    pub min_stake: Option<u64>,
    pub max_stake: Option<u64>,

    pub base_commission_bps: Option<u16>,
    pub min_commission_bps: Option<u16>,
    pub tier_commission_discount_bps: Option<[u16; TIER_COUNT]>,

    pub tier_win_bonus_bps: Option<[u16; TIER_COUNT]>,
    pub tier_thresholds: Option<[u64; TIER_COUNT]>,
    pub win_bands: Option<[WinBand; WIN_BAND_COUNT]>,
    pub max_win_bps: Option<u16>,

    pub payout_multiplier_bps: Option<[u32; BET_TYPE_COUNT]>,
    pub referral_bps: Option<u16>,

    pub vesting_delay_secs: Option<i64>,
    pub request_timeout_secs: Option<i64>,
}

impl ConfigUpdateArgs {
    /// Writes every provided field into `cfg`.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(pause) = self.pause_bet {
            cfg.pause_bet = if pause == 1 { 1 } else { 0 };
        }
        if let Some(pause) = self.pause_claim {
            cfg.pause_claim = if pause == 1 { 1 } else { 0 };
        }
        if let Some(v) = self.new_authority { cfg.authority = v; }

        if let Some(v) = self.min_stake { cfg.min_stake = v; }
        if let Some(v) = self.max_stake { cfg.max_stake = v; }

        if let Some(v) = self.base_commission_bps { cfg.base_commission_bps = v; }
        if let Some(v) = self.min_commission_bps { cfg.min_commission_bps = v; }
        if let Some(v) = self.tier_commission_discount_bps { cfg.tier_commission_discount_bps = v; }

        if let Some(v) = self.tier_win_bonus_bps { cfg.tier_win_bonus_bps = v; }
        if let Some(v) = self.tier_thresholds { cfg.tier_thresholds = v; }
        if let Some(v) = self.win_bands { cfg.win_bands = v; }
        if let Some(v) = self.max_win_bps { cfg.max_win_bps = v; }

        if let Some(v) = self.payout_multiplier_bps { cfg.payout_multiplier_bps = v; }
        if let Some(v) = self.referral_bps { cfg.referral_bps = v; }

        if let Some(v) = self.vesting_delay_secs { cfg.vesting_delay_secs = v; }
        if let Some(v) = self.request_timeout_secs { cfg.request_timeout_secs = v; }
    }
}

fn require_valid_key_target(target: Pubkey, program_id: &Pubkey, forbidden: &[Pubkey]) -> Result<()> {
    require!(target != Pubkey::default(), CryptoHandsError::InvalidAuthorityTarget);
    require!(target != system_program::ID, CryptoHandsError::InvalidAuthorityTarget);
    require!(target != *program_id, CryptoHandsError::InvalidAuthorityTarget);
    require!(!forbidden.contains(&target), CryptoHandsError::InvalidAuthorityTarget);
    Ok(())
}

/// Updates one or more global configuration parameters.
///
/// - Only callable by the `authority` stored in `Config`.
/// - The patched config is validated as a whole before anything is written.
pub fn update_config_handler(ctx: Context<UpdateConfig>, args: ConfigUpdateArgs) -> Result<()> {
    let program_id = ctx.program_id;
    let config_key = ctx.accounts.config.key();
    let pool_key = ctx.accounts.pool.key();

    // ─────────────────────────────────────────────
    // Key rotation targets
    // ─────────────────────────────────────────────
    let forbidden = [config_key, pool_key];
    if let Some(new_auth) = args.new_authority {
        require_valid_key_target(new_auth, program_id, &forbidden)?;
    }
    if let Some(new_oracle) = args.new_oracle_authority {
        require_valid_key_target(new_oracle, program_id, &forbidden)?;
    }

    // ─────────────────────────────────────────────
    // compute effective -> validate -> apply ONCE
    // ─────────────────────────────────────────────
    let cfg = &mut ctx.accounts.config;
    let mut effective: Config = (**cfg).clone();
    args.apply_to(&mut effective);
    effective.validate()?;

    args.apply_to(cfg);

    if let Some(v) = args.new_authority {
        ctx.accounts.pool.authority = v;
    }
    if let Some(v) = args.new_oracle_authority {
        ctx.accounts.rng_state.oracle_authority = v;
    }

    msg!(
        "config updated: pause_bet={} pause_claim={}",
        ctx.accounts.config.pause_bet,
        ctx.accounts.config.pause_claim
    );
    emit!(ConfigUpdated { authority: ctx.accounts.config.authority });

    Ok(())
}
