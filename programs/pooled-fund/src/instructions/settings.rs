use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, state::*};

/// Shared accounts for the governance / fund manager admin surface
#[derive(Accounts)]
pub struct AdminSetting<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [FUND_SEED, fund_state.proxy.as_ref()],
        bump = fund_state.bump,
    )]
    pub fund_state: Account<'info, FundState>,
}

pub fn set_fund_manager(ctx: Context<AdminSetting>, manager: Pubkey) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    fund.fund_manager = manager;
    Ok(())
}

pub fn set_deposit_limit(ctx: Context<AdminSetting>, limit: u64) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    fund.deposit_limit = limit;
    Ok(())
}

pub fn set_deposit_limit_tx_max(ctx: Context<AdminSetting>, limit: u64) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    fund.deposit_limit_tx_max = limit;
    Ok(())
}

pub fn set_deposit_limit_tx_min(ctx: Context<AdminSetting>, limit: u64) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    fund.deposit_limit_tx_min = limit;
    Ok(())
}

pub fn set_performance_fee_fund(ctx: Context<AdminSetting>, fee_bps: u16) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    require!(fee_bps < MAX_FEE_BPS, FundError::FeeTooHigh);
    fund.performance_fee_fund_bps = fee_bps;
    Ok(())
}

pub fn set_platform_fee(ctx: Context<AdminSetting>, fee_bps: u16) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    require!(fee_bps < MAX_FEE_BPS, FundError::FeeTooHigh);
    fund.platform_fee_bps = fee_bps;
    Ok(())
}

pub fn set_withdrawal_fee(ctx: Context<AdminSetting>, fee_bps: u16) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    require!(fee_bps < MAX_FEE_BPS, FundError::FeeTooHigh);
    fund.withdrawal_fee_bps = fee_bps;
    Ok(())
}

pub fn set_rewards(ctx: Context<AdminSetting>, rewards: Pubkey) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    fund.rewards = rewards;
    Ok(())
}

pub fn set_platform_rewards(ctx: Context<AdminSetting>, rewards: Pubkey) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    fund.platform_rewards = rewards;
    Ok(())
}

pub fn pause_deposits(ctx: Context<AdminSetting>, paused: bool) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    fund.deposits_paused = paused;
    Ok(())
}

pub fn set_should_rebalance(ctx: Context<AdminSetting>, should_rebalance: bool) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.require_governance_or_manager(&ctx.accounts.caller.key())?;
    fund.should_rebalance = should_rebalance;
    Ok(())
}
