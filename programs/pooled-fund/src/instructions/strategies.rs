use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Register a strategy custody account with the fund
///
/// The custody account is the strategy's claim on fund capital: it must
/// hold the fund's underlying mint and be owned by the fund authority
/// PDA, which is how "belongs to this fund" is enforced.
#[derive(Accounts)]
pub struct AddStrategy<'info> {
    pub governance: Signer<'info>,

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
        constraint = strategy_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = strategy_account.owner == fund_authority.key() @ FundError::StrategyNotOwnedByFund,
    )]
    pub strategy_account: Account<'info, TokenAccount>,
}

pub fn add_strategy(
    ctx: Context<AddStrategy>,
    weightage_bps: u16,
    performance_fee_bps: u16,
) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance(&ctx.accounts.governance.key())?;
    fund.enter_guard()?;

    let strategy = ctx.accounts.strategy_account.key();
    fund.add_strategy_entry(strategy, weightage_bps, performance_fee_bps)?;

    emit!(StrategyAdded {
        fund: fund.key(),
        strategy,
        weightage_bps,
        performance_fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    fund.exit_guard();
    Ok(())
}

/// Divest a strategy completely and drop it from the registry
#[derive(Accounts)]
pub struct RemoveStrategy<'info> {
    pub governance: Signer<'info>,

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
        constraint = strategy_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
    )]
    pub strategy_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = fund_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = fund_token_account.owner == fund_authority.key() @ FundError::InvalidOwner,
    )]
    pub fund_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn remove_strategy(ctx: Context<RemoveStrategy>) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance(&ctx.accounts.governance.key())?;
    fund.enter_guard()?;

    let strategy = ctx.accounts.strategy_account.key();
    // order of the surviving entries is preserved
    fund.remove_strategy_entry(&strategy)?;

    // pull 100% of the invested balance back to idle
    let divested = ctx.accounts.strategy_account.amount;
    if divested > 0 {
        let fund_key = fund.key();
        let authority_seeds: &[&[u8]] = &[
            FUND_AUTHORITY_SEED,
            fund_key.as_ref(),
            &[fund.authority_bump],
        ];
        let signer_seeds = &[&authority_seeds[..]];

        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.strategy_account.to_account_info(),
                to: ctx.accounts.fund_token_account.to_account_info(),
                authority: ctx.accounts.fund_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, divested)?;
    }

    emit!(StrategyRemoved {
        fund: fund.key(),
        strategy,
        divested,
        timestamp: Clock::get()?.unix_timestamp,
    });

    fund.exit_guard();
    Ok(())
}

/// Weightage / performance fee updates on an active strategy
#[derive(Accounts)]
pub struct UpdateStrategy<'info> {
    pub governance: Signer<'info>,

    #[account(
        mut,
        seeds = [FUND_SEED, fund_state.proxy.as_ref()],
        bump = fund_state.bump,
    )]
    pub fund_state: Account<'info, FundState>,
}

pub fn update_strategy_weightage(
    ctx: Context<UpdateStrategy>,
    strategy: Pubkey,
    weightage_bps: u16,
) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance(&ctx.accounts.governance.key())?;
    fund.update_strategy_weightage(&strategy, weightage_bps)
}

pub fn update_strategy_performance_fee(
    ctx: Context<UpdateStrategy>,
    strategy: Pubkey,
    performance_fee_bps: u16,
) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance(&ctx.accounts.governance.key())?;
    fund.update_strategy_performance_fee(&strategy, performance_fee_bps)
}
