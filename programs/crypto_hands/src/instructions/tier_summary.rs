use anchor_lang::prelude::*;

use crate::state::TierHolding;

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct GetTierSummary<'info> {
    /// CHECK: May not exist yet; an empty address reads as no tokens.
    #[account(
        seeds = [TierHolding::SEED_PREFIX, owner.as_ref()],
        bump,
    )]
    pub holding: UncheckedAccount<'info>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TierSummary {
    pub highest_tier: u8,
    pub token_count: u32,
}

pub fn get_tier_summary_handler(ctx: Context<GetTierSummary>, _owner: Pubkey) -> Result<TierSummary> {
    let info = ctx.accounts.holding.to_account_info();
    if info.data_is_empty() || info.owner != &crate::ID {
        return Ok(TierSummary::default());
    }

    let data = info.try_borrow_data()?;
    let holding = TierHolding::try_deserialize(&mut &data[..])?;
    Ok(TierSummary {
        highest_tier: holding.highest_tier(),
        token_count: holding.token_count(),
    })
}
