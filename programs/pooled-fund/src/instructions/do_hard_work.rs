use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

use super::strategy_balances;

/// Harvest every strategy, apply the fee waterfall, accrue the
/// platform fee and rebalance
///
/// Remaining accounts: the strategy custody accounts in registration
/// order, writable. Any failing transfer aborts the whole invocation;
/// no partial fee application survives.
#[derive(Accounts)]
pub struct DoHardWork<'info> {
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

    /// Strategy creator fees land with governance
    #[account(
        mut,
        constraint = governance_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = governance_token_account.owner == fund_state.governance @ FundError::InvalidOwner,
    )]
    pub governance_token_account: Account<'info, TokenAccount>,

    /// Fund performance fees land with the rewards address
    #[account(
        mut,
        constraint = rewards_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = rewards_token_account.owner == fund_state.rewards @ FundError::InvalidOwner,
    )]
    pub rewards_token_account: Account<'info, TokenAccount>,

    /// Platform fees land with the platform rewards address
    #[account(
        mut,
        constraint = platform_rewards_token_account.mint == fund_state.underlying_mint @ FundError::InvalidMint,
        constraint = platform_rewards_token_account.owner == fund_state.platform_rewards @ FundError::InvalidOwner,
    )]
    pub platform_rewards_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler<'info>(ctx: Context<'_, '_, '_, 'info, DoHardWork<'info>>) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    ctx.accounts.fund_state.require_governance_or_manager(&caller)?;
    ctx.accounts.fund_state.enter_guard()?;

    let invested = strategy_balances(&ctx.accounts.fund_state, ctx.remaining_accounts)?;
    let idle = ctx.accounts.fund_token_account.amount;
    let now = Clock::get()?.unix_timestamp;

    let plan = plan_hard_work(&ctx.accounts.fund_state, idle, &invested, now)?;

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

    // fee waterfall, strategy by strategy in registration order
    for (i, report) in plan.reports.iter().enumerate() {
        let custody = ctx.remaining_accounts[i].clone();
        pay(
            custody.clone(),
            ctx.accounts.governance_token_account.to_account_info(),
            report.strategy_creator_fee,
        )?;
        pay(
            custody,
            ctx.accounts.rewards_token_account.to_account_info(),
            report.fund_fee,
        )?;

        emit!(StrategyProfit {
            strategy: report.strategy,
            profit: report.profit,
            strategy_creator_fee: report.strategy_creator_fee,
            fund_fee: report.fund_fee,
            timestamp: now,
        });
    }

    // time-accrued platform fee from idle
    pay(
        idle_account.clone(),
        ctx.accounts.platform_rewards_token_account.to_account_info(),
        plan.platform_fee,
    )?;

    // rebalance pass against the post-fee totals
    for mv in &plan.divests {
        pay(
            ctx.remaining_accounts[mv.strategy_index].clone(),
            idle_account.clone(),
            mv.amount,
        )?;
    }
    for mv in &plan.invests {
        pay(
            idle_account.clone(),
            ctx.remaining_accounts[mv.strategy_index].clone(),
            mv.amount,
        )?;
    }

    let fund = &mut ctx.accounts.fund_state;
    for (entry, report) in fund.strategies.iter_mut().zip(plan.reports.iter()) {
        entry.allocated_principal = report.new_principal;
    }
    fund.last_hard_work_ts = now;
    fund.should_rebalance = false;

    emit!(HardWorkDone {
        fund: fund_key,
        idle_balance: plan.idle_after,
        price_per_share: plan.price_per_share_after,
        platform_fee: plan.platform_fee,
        timestamp: now,
    });

    fund.exit_guard();
    Ok(())
}
