use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events, state::*};

use super::{strategy_balances, total_assets};

/// Burn shares for underlying from the idle balance
///
/// Withdrawals draw from idle capital only; when idle cannot cover the
/// gross amount the call fails instead of force-divesting a strategy.
/// Remaining accounts: strategy custody accounts in registration order.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub withdrawer: Signer<'info>,

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

    #[account(
        mut,
        constraint = withdrawer_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = withdrawer_token_account.owner == withdrawer.key() @ FundError::InvalidOwner,
    )]
    pub withdrawer_token_account: Account<'info, TokenAccount>,

    /// Destination of the withdrawal fee
    #[account(
        mut,
        constraint = rewards_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = rewards_token_account.owner == fund_state.rewards @ FundError::InvalidOwner,
    )]
    pub rewards_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.enter_guard()?;

    let invested = strategy_balances(fund, ctx.remaining_accounts)?;
    let idle = ctx.accounts.fund_token_account.amount;
    let assets_before = total_assets(idle, &invested)?;

    let (gross, fee, net) = fund.calculate_withdrawal(shares, assets_before)?;
    require!(gross <= idle, FundError::InsufficientLiquidity);

    // EFFECTS: burn before paying out
    let withdrawer = ctx.accounts.withdrawer.key();
    fund.burn_shares(&withdrawer, shares)?;

    let fund_key = fund.key();
    let authority_seeds: &[&[u8]] = &[
        FUND_AUTHORITY_SEED,
        fund_key.as_ref(),
        &[fund.authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    if net > 0 {
        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.fund_token_account.to_account_info(),
                to: ctx.accounts.withdrawer_token_account.to_account_info(),
                authority: ctx.accounts.fund_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, net)?;
    }

    if fee > 0 {
        let fee_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.fund_token_account.to_account_info(),
                to: ctx.accounts.rewards_token_account.to_account_info(),
                authority: ctx.accounts.fund_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(fee_ctx, fee)?;
    }

    emit!(events::Withdraw {
        fund: fund_key,
        beneficiary: withdrawer,
        amount: net,
        fee,
        timestamp: Clock::get()?.unix_timestamp,
    });

    fund.exit_guard();
    Ok(())
}
