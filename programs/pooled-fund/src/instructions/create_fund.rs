use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Deploy a new (proxy, fund state, custody) triple
///
/// Governance-only. The implementation account must deserialize as a
/// fund manifest and advertise the fund capability; anything else is
/// rejected before any state is created.
#[derive(Accounts)]
pub struct CreateFund<'info> {
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, FundFactory>,

    /// Capability check: a non-manifest account fails deserialization
    /// here and the whole call reverts
    pub implementation: Account<'info, FundImplementation>,

    /// Mint of the underlying asset users will deposit
    pub underlying_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = governance,
        space = FundProxy::SPACE,
        seeds = [
            FUND_PROXY_SEED,
            factory.key().as_ref(),
            &factory.fund_count.to_le_bytes(),
        ],
        bump
    )]
    pub fund_proxy: Account<'info, FundProxy>,

    #[account(
        init,
        payer = governance,
        space = FundState::SPACE,
        seeds = [FUND_SEED, fund_proxy.key().as_ref()],
        bump
    )]
    pub fund_state: Account<'info, FundState>,

    /// CHECK: PDA owning the fund's custody token accounts, validated
    /// by seeds
    #[account(
        seeds = [FUND_AUTHORITY_SEED, fund_state.key().as_ref()],
        bump
    )]
    pub fund_authority: UncheckedAccount<'info>,

    /// Idle balance custody
    #[account(
        init,
        payer = governance,
        associated_token::mint = underlying_mint,
        associated_token::authority = fund_authority,
    )]
    pub fund_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateFund>, name: String, symbol: String) -> Result<()> {
    require!(name.len() <= MAX_NAME_LEN, FundError::NameTooLong);
    require!(symbol.len() <= MAX_SYMBOL_LEN, FundError::SymbolTooLong);

    let factory = &mut ctx.accounts.factory;
    factory.require_governance(&ctx.accounts.governance.key())?;

    let proxy = &mut ctx.accounts.fund_proxy;
    proxy.validate_upgrade(&ctx.accounts.implementation)?;
    proxy.fund = ctx.accounts.fund_state.key();
    proxy.implementation = ctx.accounts.implementation.key();
    proxy.state_version = ctx.accounts.implementation.state_version;
    proxy.bump = ctx.bumps.fund_proxy;

    let now = Clock::get()?.unix_timestamp;
    let governance = ctx.accounts.governance.key();
    let decimals = ctx.accounts.underlying_mint.decimals;

    let fund = &mut ctx.accounts.fund_state;
    fund.proxy = proxy.key();
    fund.governance = governance;
    fund.pending_governance = Pubkey::default();
    fund.fund_manager = governance;
    fund.rewards = governance;
    fund.platform_rewards = governance;
    fund.underlying_mint = ctx.accounts.underlying_mint.key();
    fund.name = name;
    fund.symbol = symbol;
    fund.decimals = decimals;
    fund.underlying_unit = 10u64
        .checked_pow(decimals as u32)
        .ok_or(FundError::MathOverflow)?;
    fund.deposit_limit = 0;
    fund.deposit_limit_tx_max = 0;
    fund.deposit_limit_tx_min = 0;
    fund.deposits_paused = false;
    fund.performance_fee_fund_bps = 0;
    fund.platform_fee_bps = 0;
    fund.withdrawal_fee_bps = 0;
    fund.total_shares = 0;
    fund.holdings = Vec::new();
    fund.allowances = Vec::new();
    fund.strategies = Vec::new();
    fund.should_rebalance = false;
    fund.last_hard_work_ts = now;
    fund.locked = false;
    fund.bump = ctx.bumps.fund_state;
    fund.authority_bump = ctx.bumps.fund_authority;

    factory.fund_count = factory
        .fund_count
        .checked_add(1)
        .ok_or(FundError::MathOverflow)?;

    emit!(NewFund {
        fund_proxy: proxy.key(),
        fund: fund.key(),
        implementation: proxy.implementation,
        underlying_mint: fund.underlying_mint,
        timestamp: now,
    });

    Ok(())
}
