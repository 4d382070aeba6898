use anchor_lang::prelude::*;

use crate::errors::CryptoHandsError;
use crate::events::ConfigMigrated;
use crate::state::Config;

#[derive(Accounts)]
pub struct MigrateConfig<'info> {
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ CryptoHandsError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    pub authority: Signer<'info>,
}

/// Upgrades a Config written by an older program build in place.
pub fn migrate_config_handler(ctx: Context<MigrateConfig>) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    let from = cfg.version;

    if cfg.migrate()? {
        msg!("config migrated: v{} -> v{}", from, cfg.version);
        emit!(ConfigMigrated { version: cfg.version });
    } else {
        msg!("config already at v{}", from);
    }
    Ok(())
}
