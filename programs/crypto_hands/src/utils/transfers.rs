use anchor_lang::prelude::*;
use crate::errors::CryptoHandsError;

/// System transfer from a signer wallet (stake, deposit) into a PDA.
pub fn transfer_lamports<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, CryptoHandsError::InvalidAmount);

    anchor_lang::system_program::transfer(
        CpiContext::new(
            system_program.clone(),
            anchor_lang::system_program::Transfer {
                from: from.clone(),
                to: to.clone(),
            },
        ),
        amount,
    )
}

/// Lamports the pool can release while staying rent exempt.
pub fn pool_spendable(pool: &AccountInfo, data_len: usize) -> Result<u64> {
    let rent_floor = Rent::get()?.minimum_balance(data_len);
    Ok(pool.lamports().saturating_sub(rent_floor))
}

/// Moves lamports out of the program-owned pool.
///
/// The pool carries data, so the system program cannot debit it; the balance
/// is moved directly. Callers must have settled their books first.
pub fn pay_from_pool(pool: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    require!(amount > 0, CryptoHandsError::InvalidAmount);

    let spendable = pool_spendable(pool, pool.data_len())?;
    require!(spendable >= amount, CryptoHandsError::InsufficientLiquidity);

    **pool.try_borrow_mut_lamports()? -= amount;
    **to.try_borrow_mut_lamports()? += amount;
    Ok(())
}
