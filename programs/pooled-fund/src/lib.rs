// Pooled Fund - pooled-capital investment fund on Solana
// Capital flows: deposit underlying for shares, governance routes the
// pool across weighted strategies, doHardWork harvests and rebalances.

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("8uUUiSRgkc8rbiFfasek86sPGkfFkVKd8KmUUpEVoLin");

#[program]
pub mod pooled_fund {
    use super::*;

    /// Initialize the factory; the deployer becomes governance
    pub fn initialize_factory(ctx: Context<InitializeFactory>) -> Result<()> {
        instructions::initialize_factory::handler(ctx)
    }

    /// Publish a fund logic manifest (permissionless)
    pub fn register_implementation(
        ctx: Context<RegisterImplementation>,
        logic_version: u16,
        state_version: u16,
    ) -> Result<()> {
        instructions::register_implementation::handler(ctx, logic_version, state_version)
    }

    /// Deploy a new fund behind an upgradeable proxy
    ///
    /// Security considerations:
    /// - Factory governance only
    /// - Implementation must carry the fund capability tag
    /// - Fund state, authority PDA and custody account created atomically
    pub fn create_fund(ctx: Context<CreateFund>, name: String, symbol: String) -> Result<()> {
        instructions::create_fund::handler(ctx, name, symbol)
    }

    /// Point the proxy at a new implementation manifest
    ///
    /// Security considerations:
    /// - Fund governance only; the finalize hook vetoes bad manifests
    /// - Fund state survives the swap untouched
    pub fn upgrade(ctx: Context<Upgrade>) -> Result<()> {
        instructions::upgrade::handler(ctx)
    }

    /// Nominate a new governance address for a fund
    pub fn update_governance(ctx: Context<FundGovernance>, candidate: Pubkey) -> Result<()> {
        instructions::governance::update_governance(ctx, candidate)
    }

    /// Complete a pending governance transfer (candidate signs)
    pub fn accept_governance(ctx: Context<FundGovernance>) -> Result<()> {
        instructions::governance::accept_governance(ctx)
    }

    /// Nominate a new governance address for the factory
    pub fn factory_update_governance(
        ctx: Context<FactoryGovernance>,
        candidate: Pubkey,
    ) -> Result<()> {
        instructions::governance::factory_update_governance(ctx, candidate)
    }

    /// Complete a pending factory governance transfer
    pub fn factory_accept_governance(ctx: Context<FactoryGovernance>) -> Result<()> {
        instructions::governance::factory_accept_governance(ctx)
    }

    /// Deposit underlying and mint shares at the current price
    ///
    /// Security considerations:
    /// - Validates depositor token accounts (mint, owner)
    /// - Uses checked math for share calculation
    /// - Follows checks-effects-interactions pattern
    /// - Remaining accounts: strategy custody accounts in registration order
    pub fn deposit<'info>(
        ctx: Context<'_, '_, '_, 'info, Deposit<'info>>,
        amount: u64,
    ) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Burn shares for underlying from the idle balance
    ///
    /// Security considerations:
    /// - Burns before paying out
    /// - Fails rather than force-divesting when idle cannot cover
    /// - Withdrawal fee is routed to the rewards address
    pub fn withdraw<'info>(
        ctx: Context<'_, '_, '_, 'info, Withdraw<'info>>,
        shares: u64,
    ) -> Result<()> {
        instructions::withdraw::handler(ctx, shares)
    }

    /// Move shares between holders
    pub fn transfer(ctx: Context<ShareLedger>, to: Pubkey, amount: u64) -> Result<()> {
        instructions::share_ledger::transfer(ctx, to, amount)
    }

    /// Set a spender allowance (overwrite semantics)
    pub fn approve(ctx: Context<ShareLedger>, spender: Pubkey, amount: u64) -> Result<()> {
        instructions::share_ledger::approve(ctx, spender, amount)
    }

    /// Move shares on behalf of a holder, spending allowance
    pub fn transfer_from(
        ctx: Context<ShareLedger>,
        from: Pubkey,
        to: Pubkey,
        amount: u64,
    ) -> Result<()> {
        instructions::share_ledger::transfer_from(ctx, from, to, amount)
    }

    /// Register a strategy custody account with the fund
    ///
    /// Security considerations:
    /// - Governance only
    /// - Custody must hold the underlying mint and be owned by the fund authority
    /// - Total weightage stays under the investment cap
    pub fn add_strategy(
        ctx: Context<AddStrategy>,
        weightage_bps: u16,
        performance_fee_bps: u16,
    ) -> Result<()> {
        instructions::strategies::add_strategy(ctx, weightage_bps, performance_fee_bps)
    }

    /// Divest a strategy completely and drop it from the registry
    pub fn remove_strategy(ctx: Context<RemoveStrategy>) -> Result<()> {
        instructions::strategies::remove_strategy(ctx)
    }

    /// Change the weightage of an active strategy
    pub fn update_strategy_weightage(
        ctx: Context<UpdateStrategy>,
        strategy: Pubkey,
        weightage_bps: u16,
    ) -> Result<()> {
        instructions::strategies::update_strategy_weightage(ctx, strategy, weightage_bps)
    }

    /// Change the creator performance fee of an active strategy
    pub fn update_strategy_performance_fee(
        ctx: Context<UpdateStrategy>,
        strategy: Pubkey,
        performance_fee_bps: u16,
    ) -> Result<()> {
        instructions::strategies::update_strategy_performance_fee(ctx, strategy, performance_fee_bps)
    }

    /// Harvest profits, apply fees and rebalance across strategies
    ///
    /// Security considerations:
    /// - Governance or fund manager only
    /// - Every transfer in the plan executes or the transaction reverts
    /// - Remaining accounts: strategy custody accounts in registration order
    pub fn do_hard_work<'info>(
        ctx: Context<'_, '_, '_, 'info, DoHardWork<'info>>,
    ) -> Result<()> {
        instructions::do_hard_work::handler(ctx)
    }

    /// Rebalance capital toward the weightage targets without harvesting
    pub fn rebalance<'info>(ctx: Context<'_, '_, '_, 'info, Rebalance<'info>>) -> Result<()> {
        instructions::rebalance::handler(ctx)
    }

    /// Admin surface (governance or fund manager)
    pub fn set_fund_manager(ctx: Context<AdminSetting>, manager: Pubkey) -> Result<()> {
        instructions::settings::set_fund_manager(ctx, manager)
    }

    /// Cap on total assets; zero means uncapped
    pub fn set_deposit_limit(ctx: Context<AdminSetting>, limit: u64) -> Result<()> {
        instructions::settings::set_deposit_limit(ctx, limit)
    }

    /// Per-transaction deposit maximum; zero means uncapped
    pub fn set_deposit_limit_tx_max(ctx: Context<AdminSetting>, limit: u64) -> Result<()> {
        instructions::settings::set_deposit_limit_tx_max(ctx, limit)
    }

    /// Per-transaction deposit minimum
    pub fn set_deposit_limit_tx_min(ctx: Context<AdminSetting>, limit: u64) -> Result<()> {
        instructions::settings::set_deposit_limit_tx_min(ctx, limit)
    }

    /// Fund-level performance fee on harvested profit
    pub fn set_performance_fee_fund(ctx: Context<AdminSetting>, fee_bps: u16) -> Result<()> {
        instructions::settings::set_performance_fee_fund(ctx, fee_bps)
    }

    /// Annualized platform fee on assets under management
    pub fn set_platform_fee(ctx: Context<AdminSetting>, fee_bps: u16) -> Result<()> {
        instructions::settings::set_platform_fee(ctx, fee_bps)
    }

    /// Fee charged on the way out
    pub fn set_withdrawal_fee(ctx: Context<AdminSetting>, fee_bps: u16) -> Result<()> {
        instructions::settings::set_withdrawal_fee(ctx, fee_bps)
    }

    pub fn set_rewards(ctx: Context<AdminSetting>, rewards: Pubkey) -> Result<()> {
        instructions::settings::set_rewards(ctx, rewards)
    }

    pub fn set_platform_rewards(ctx: Context<AdminSetting>, rewards: Pubkey) -> Result<()> {
        instructions::settings::set_platform_rewards(ctx, rewards)
    }

    pub fn pause_deposits(ctx: Context<AdminSetting>, paused: bool) -> Result<()> {
        instructions::settings::pause_deposits(ctx, paused)
    }

    pub fn set_should_rebalance(ctx: Context<AdminSetting>, should_rebalance: bool) -> Result<()> {
        instructions::settings::set_should_rebalance(ctx, should_rebalance)
    }
}
