use anchor_lang::prelude::*;

use crate::{constants::*, events, state::*};

/// Share ledger surface: transfer / approve / transfer_from
///
/// The ledger lives inside the fund state; holders are identified by
/// signing key, no per-holder accounts exist.
#[derive(Accounts)]
pub struct ShareLedger<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [FUND_SEED, fund_state.proxy.as_ref()],
        bump = fund_state.bump,
    )]
    pub fund_state: Account<'info, FundState>,
}

pub fn transfer(ctx: Context<ShareLedger>, to: Pubkey, amount: u64) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.enter_guard()?;

    let from = ctx.accounts.caller.key();
    fund.transfer_shares(&from, &to, amount)?;

    emit!(events::Transfer {
        fund: fund.key(),
        from,
        to,
        amount,
    });

    fund.exit_guard();
    Ok(())
}

pub fn approve(ctx: Context<ShareLedger>, spender: Pubkey, amount: u64) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.enter_guard()?;

    let owner = ctx.accounts.caller.key();
    fund.approve_shares(&owner, &spender, amount)?;

    emit!(events::Approval {
        fund: fund.key(),
        owner,
        spender,
        amount,
    });

    fund.exit_guard();
    Ok(())
}

pub fn transfer_from(
    ctx: Context<ShareLedger>,
    from: Pubkey,
    to: Pubkey,
    amount: u64,
) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.enter_guard()?;

    let spender = ctx.accounts.caller.key();
    fund.spend_allowance(&from, &spender, amount)?;
    fund.transfer_shares(&from, &to, amount)?;

    emit!(events::Transfer {
        fund: fund.key(),
        from,
        to,
        amount,
    });

    fund.exit_guard();
    Ok(())
}
