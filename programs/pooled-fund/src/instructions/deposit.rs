use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events, state::*};

use super::{strategy_balances, total_assets};

/// Deposit underlying for freshly minted shares
///
/// Remaining accounts: the strategy custody accounts in registration
/// order, so the live asset total prices the mint correctly.
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

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
        constraint = depositor_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = depositor_token_account.owner == depositor.key() @ FundError::InvalidOwner,
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = fund_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = fund_token_account.owner == fund_authority.key() @ FundError::InvalidOwner,
    )]
    pub fund_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.enter_guard()?;

    let invested = strategy_balances(fund, ctx.remaining_accounts)?;
    let assets_before = total_assets(ctx.accounts.fund_token_account.amount, &invested)?;

    fund.check_deposit(amount, assets_before)?;
    let shares_to_mint = fund.calculate_shares(amount, assets_before)?;

    // EFFECTS before the token interaction
    let depositor = ctx.accounts.depositor.key();
    fund.mint_shares(&depositor, shares_to_mint)?;

    // pull the underlying in; an insufficient delegation fails here and
    // rolls the mint back with the rest of the transaction
    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.depositor_token_account.to_account_info(),
            to: ctx.accounts.fund_token_account.to_account_info(),
            authority: ctx.accounts.depositor.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, amount)?;

    emit!(events::Deposit {
        fund: fund.key(),
        beneficiary: depositor,
        amount,
        shares_minted: shares_to_mint,
        timestamp: Clock::get()?.unix_timestamp,
    });

    fund.exit_guard();
    Ok(())
}
