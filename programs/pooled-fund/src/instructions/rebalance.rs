use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

use super::strategy_balances;

/// Manual rebalance: move capital toward the weightage targets without
/// harvesting
///
/// Remaining accounts: the strategy custody accounts in registration
/// order, writable.
#[derive(Accounts)]
pub struct Rebalance<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [FUND_SEED, fund_state.proxy.as_ref()],
        bump = fund_state.bump,
    )]
    pub fund_state: Account<'info, FundState>,

    /// CHECK: custody owner PDA, validated by seeds
    #[account(
        seeds = [FUND_AUTHORITY_SEED, fund_state.key().as_ref()],
        bump = fund_state.authority_bump,
    )]
    pub fund_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = fund_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = fund_token_account.owner == fund_authority.key() @ FundError::InvalidOwner,
    )]
    pub fund_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler<'info>(ctx: Context<'_, '_, '_, 'info, Rebalance<'info>>) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    ctx.accounts.fund_state.require_governance_or_manager(&caller)?;
    ctx.accounts.fund_state.enter_guard()?;

    let invested = strategy_balances(&ctx.accounts.fund_state, ctx.remaining_accounts)?;
    let idle = ctx.accounts.fund_token_account.amount;

    let plan = plan_rebalance(&ctx.accounts.fund_state, idle, &invested)?;

    let fund_key = ctx.accounts.fund_state.key();
    let authority_bump = ctx.accounts.fund_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[FUND_AUTHORITY_SEED, fund_key.as_ref(), &[authority_bump]];
    let signer_seeds = &[&authority_seeds[..]];

    let token_program = ctx.accounts.token_program.to_account_info();
    let authority = ctx.accounts.fund_authority.to_account_info();
    let idle_account = ctx.accounts.fund_token_account.to_account_info();

    let pay = |from: AccountInfo<'info>, to: AccountInfo<'info>, amount: u64| -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let transfer_ctx = CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from,
                to,
                authority: authority.clone(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, amount)
    };

    let mut divested: u64 = 0;
    for mv in &plan.divests {
        pay(
            ctx.remaining_accounts[mv.strategy_index].clone(),
            idle_account.clone(),
            mv.amount,
        )?;
        divested = divested.checked_add(mv.amount).ok_or(FundError::MathOverflow)?;
    }

    let mut invested_total: u64 = 0;
    for mv in &plan.invests {
        pay(
            idle_account.clone(),
            ctx.remaining_accounts[mv.strategy_index].clone(),
            mv.amount,
        )?;
        invested_total = invested_total
            .checked_add(mv.amount)
            .ok_or(FundError::MathOverflow)?;
    }

    let fund = &mut ctx.accounts.fund_state;
    for (entry, principal) in fund.strategies.iter_mut().zip(plan.new_principals.iter()) {
        entry.allocated_principal = *principal;
    }
    fund.should_rebalance = false;

    emit!(Rebalanced {
        fund: fund_key,
        invested: invested_total,
        divested,
        timestamp: Clock::get()?.unix_timestamp,
    });

    fund.exit_guard();
    Ok(())
}
