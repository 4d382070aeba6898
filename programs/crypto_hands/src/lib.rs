use anchor_lang::prelude::*;
use solana_security_txt::security_txt;

// -----------------------------------------------------------------------------
// Program ID
// -----------------------------------------------------------------------------
declare_id!("HtrG93k5tKrgSEzC5ySHKf9oSbfdxjr3ZkHhzwGrzz6S");

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "Crypto Hands",
    project_url: "https://cryptohands.io",
    source_code: "https://github.com/cryptohands/crypto-hands-anchor",
    contacts: "mailto:security@cryptohands.io",
    policy: "https://github.com/cryptohands/crypto-hands-anchor/blob/main/SECURITY.md",
    preferred_languages: "en"
}


// -----------------------------------------------------------------------------
// Modules
// -----------------------------------------------------------------------------
pub mod state;
pub mod instructions;
pub mod utils;
pub mod errors;
pub mod events;
pub mod constants;

#[cfg(test)]
mod test_utils;

use instructions::*;

// -----------------------------------------------------------------------------
// Program Entrypoints
// -----------------------------------------------------------------------------
#[program]
pub mod crypto_hands {
    use super::*;

    // -------------------------------------------------------------------------
    // initialize
    // -------------------------------------------------------------------------
    pub fn initialize(ctx: Context<Initialize>, oracle_authority: Pubkey) -> Result<()> {
        initialize_handler(ctx, oracle_authority)
    }

    // -------------------------------------------------------------------------
    // update_config
    // -------------------------------------------------------------------------
    pub fn update_config(ctx: Context<UpdateConfig>, args: ConfigUpdateArgs) -> Result<()> {
        update_config_handler(ctx, args)
    }

    // -------------------------------------------------------------------------
    // migrate_config
    // -------------------------------------------------------------------------
    pub fn migrate_config(ctx: Context<MigrateConfig>) -> Result<()> {
        migrate_config_handler(ctx)
    }

    // -------------------------------------------------------------------------
    // deposit_liquidity
    // -------------------------------------------------------------------------
    pub fn deposit_liquidity(ctx: Context<DepositLiquidity>, amount: u64) -> Result<()> {
        deposit_liquidity_handler(ctx, amount)
    }

    // -------------------------------------------------------------------------
    // withdraw_liquidity
    // -------------------------------------------------------------------------
    pub fn withdraw_liquidity(ctx: Context<WithdrawLiquidity>, amount: u64) -> Result<()> {
        withdraw_liquidity_handler(ctx, amount)
    }

    // -------------------------------------------------------------------------
    // register_player
    // -------------------------------------------------------------------------
    pub fn register_player(ctx: Context<RegisterPlayer>, player: Pubkey) -> Result<()> {
        register_player_handler(ctx, player)
    }

    // -------------------------------------------------------------------------
    // place_bet
    // -------------------------------------------------------------------------
    pub fn place_bet(
        ctx: Context<PlaceBet>,
        bet_type: u8,
        referrer: Pubkey,
        stake: u64,
    ) -> Result<()> {
        place_bet_handler(ctx, bet_type, referrer, stake)
    }

    // -------------------------------------------------------------------------
    // fulfill_randomness (oracle)
    // -------------------------------------------------------------------------
    pub fn fulfill_randomness(
        ctx: Context<FulfillRandomness>,
        request_id: u64,
        randomness: [u8; 32],
    ) -> Result<()> {
        fulfill_randomness_handler(ctx, request_id, randomness)
    }

    // -------------------------------------------------------------------------
    // expire_wager
    // -------------------------------------------------------------------------
    pub fn expire_wager(ctx: Context<ExpireWager>) -> Result<()> {
        expire_wager_handler(ctx)
    }

    // -------------------------------------------------------------------------
    // claim_winnings
    // -------------------------------------------------------------------------
    pub fn claim_winnings<'info>(
        ctx: Context<'_, '_, 'info, 'info, ClaimWinnings<'info>>,
    ) -> Result<()> {
        claim_winnings_handler(ctx)
    }

    // -------------------------------------------------------------------------
    // close_wager
    // -------------------------------------------------------------------------
    pub fn close_wager(ctx: Context<CloseWager>) -> Result<()> {
        close_wager_handler(ctx)
    }

    // -------------------------------------------------------------------------
    // views
    // -------------------------------------------------------------------------
    pub fn get_last_request_id(ctx: Context<GetLastRequestId>) -> Result<u64> {
        get_last_request_id_handler(ctx)
    }

    pub fn get_tier_summary(ctx: Context<GetTierSummary>, owner: Pubkey) -> Result<TierSummary> {
        get_tier_summary_handler(ctx, owner)
    }
}
