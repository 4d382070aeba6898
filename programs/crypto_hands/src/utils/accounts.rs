use anchor_lang::prelude::*;
use anchor_lang::system_program::{allocate, assign, create_account, Allocate, Assign, CreateAccount};

use crate::utils::transfers::transfer_lamports;

/// Lamports still needed for an address holding `current` to reach `required`.
pub fn rent_top_up(current: u64, required: u64) -> u64 {
    required.saturating_sub(current)
}

/// Creates a rent-exempt PDA of `space` bytes owned by this program.
///
/// Used where the account is only needed on some paths (a hand token is
/// minted on wins only), so it cannot be declared with `init`. An address
/// that already holds lamports is adopted the way `init` does it: top up
/// to rent exemption, then allocate and assign under the PDA's seeds.
pub fn create_program_pda<'info>(
    payer: &AccountInfo<'info>,
    new_account: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    space: usize,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let required = Rent::get()?.minimum_balance(space);
    let current = new_account.lamports();

    if current == 0 {
        return create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: new_account.clone(),
                },
                &[signer_seeds],
            ),
            required,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = rent_top_up(current, required);
    if top_up > 0 {
        transfer_lamports(payer, new_account, system_program, top_up)?;
    }

    allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: new_account.clone(),
            },
            &[signer_seeds],
        ),
        space as u64,
    )?;

    assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: new_account.clone(),
            },
            &[signer_seeds],
        ),
        &crate::ID,
    )
}
