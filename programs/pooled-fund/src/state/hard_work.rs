use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::FundError;
use crate::state::FundState;

/// Harvest outcome for one strategy, in registration order
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyReport {
    pub strategy: Pubkey,
    pub profit: u64,
    pub strategy_creator_fee: u64,
    pub fund_fee: u64,
    /// Principal recorded after fees and the rebalance pass
    pub new_principal: u64,
}

/// One transfer between the idle balance and a strategy custody account
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapitalMove {
    pub strategy_index: usize,
    pub amount: u64,
}

/// Full plan for one `do_hard_work` invocation
///
/// The planner is pure: it reads the fund state and live balances and
/// returns every transfer and principal update the handler must apply.
/// Either the whole plan executes or the transaction rolls back.
#[derive(Clone, Debug, PartialEq)]
pub struct HardWorkPlan {
    pub reports: Vec<StrategyReport>,
    pub platform_fee: u64,
    pub divests: Vec<CapitalMove>,
    pub invests: Vec<CapitalMove>,
    pub idle_after: u64,
    pub total_assets_after: u64,
    pub price_per_share_after: u128,
}

/// Plan for a standalone rebalance pass (no harvesting)
#[derive(Clone, Debug, PartialEq)]
pub struct RebalancePlan {
    pub divests: Vec<CapitalMove>,
    pub invests: Vec<CapitalMove>,
    pub new_principals: Vec<u64>,
    pub idle_after: u64,
}

fn mul_bps(amount: u64, bps: u16) -> Result<u64> {
    let out = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(FundError::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(out).map_err(|_| error!(FundError::MathOverflow))
}

/// Deterministic full rebalance pass over all strategies
///
/// Targets are computed once against the shared asset total, then
/// over-target strategies are divested back to idle before shortfalls
/// are funded, both in registration order. Idle never goes negative;
/// if it cannot cover every shortfall the later strategies wait for
/// the next pass.
fn rebalance_pass(
    fund: &FundState,
    idle: u64,
    balances: &mut [u64],
) -> Result<(Vec<CapitalMove>, Vec<CapitalMove>, u64)> {
    let total: u128 = balances.iter().map(|b| *b as u128).sum::<u128>() + idle as u128;

    let mut targets = Vec::with_capacity(fund.strategies.len());
    for entry in fund.strategies.iter() {
        let target = total
            .checked_mul(entry.weightage_bps as u128)
            .ok_or(FundError::MathOverflow)?
            / BPS_DENOMINATOR as u128;
        targets.push(u64::try_from(target).map_err(|_| error!(FundError::MathOverflow))?);
    }

    let mut idle = idle;
    let mut divests = Vec::new();
    let mut invests = Vec::new();

    for (i, balance) in balances.iter_mut().enumerate() {
        if *balance > targets[i] {
            let excess = *balance - targets[i];
            *balance = targets[i];
            idle = idle.checked_add(excess).ok_or(FundError::MathOverflow)?;
            divests.push(CapitalMove {
                strategy_index: i,
                amount: excess,
            });
        }
    }

    for (i, balance) in balances.iter_mut().enumerate() {
        if *balance < targets[i] {
            let shortfall = (targets[i] - *balance).min(idle);
            if shortfall == 0 {
                continue;
            }
            *balance += shortfall;
            idle -= shortfall;
            invests.push(CapitalMove {
                strategy_index: i,
                amount: shortfall,
            });
        }
    }

    Ok((divests, invests, idle))
}

/// Plan a full hard work: harvest each strategy, apply the fee
/// waterfall, accrue the platform fee, then rebalance
///
/// `invested` carries the live custody balance of every registered
/// strategy, in registration order.
pub fn plan_hard_work(
    fund: &FundState,
    idle: u64,
    invested: &[u64],
    now: i64,
) -> Result<HardWorkPlan> {
    require!(
        invested.len() == fund.strategies.len(),
        FundError::StrategyAccountMismatch
    );

    // harvest + fee waterfall, per strategy
    let mut reports = Vec::with_capacity(fund.strategies.len());
    let mut balances = Vec::with_capacity(fund.strategies.len());
    for (entry, &balance) in fund.strategies.iter().zip(invested.iter()) {
        let profit = balance.saturating_sub(entry.allocated_principal);
        let strategy_creator_fee = mul_bps(profit, entry.performance_fee_bps)?;
        let fund_fee = mul_bps(profit - strategy_creator_fee, fund.performance_fee_fund_bps)?;

        // fees leave the strategy; the rest of the profit compounds
        let after_fees = balance
            .checked_sub(strategy_creator_fee)
            .and_then(|b| b.checked_sub(fund_fee))
            .ok_or(FundError::MathOverflow)?;

        reports.push(StrategyReport {
            strategy: entry.strategy,
            profit,
            strategy_creator_fee,
            fund_fee,
            new_principal: after_fees,
        });
        balances.push(after_fees);
    }

    // time-accrued platform fee, paid from idle
    let elapsed = now.saturating_sub(fund.last_hard_work_ts).max(0);
    let invested_total: u128 = balances.iter().map(|b| *b as u128).sum();
    let platform_fee = if fund.platform_fee_bps > 0 && elapsed > 0 {
        let base = invested_total + idle as u128;
        let accrued = base
            .checked_mul(fund.platform_fee_bps as u128)
            .ok_or(FundError::MathOverflow)?
            .checked_mul(elapsed as u128)
            .ok_or(FundError::MathOverflow)?
            / BPS_DENOMINATOR as u128
            / SECONDS_PER_YEAR as u128;
        // never draw more than the idle balance holds
        u64::try_from(accrued)
            .unwrap_or(u64::MAX)
            .min(idle)
    } else {
        0
    };
    let idle = idle - platform_fee;

    // rebalance against the post-fee asset total
    let (divests, invests, idle_after) = rebalance_pass(fund, idle, &mut balances)?;
    for (report, balance) in reports.iter_mut().zip(balances.iter()) {
        report.new_principal = *balance;
    }

    let total_assets_after = balances
        .iter()
        .try_fold(idle_after, |acc, b| acc.checked_add(*b))
        .ok_or(FundError::MathOverflow)?;

    Ok(HardWorkPlan {
        reports,
        platform_fee,
        divests,
        invests,
        idle_after,
        total_assets_after,
        price_per_share_after: fund.price_per_share(total_assets_after)?,
    })
}

/// Plan a standalone rebalance (manual trigger path)
///
/// Principals move with the capital so unharvested profit keeps
/// counting as profit on the next hard work.
pub fn plan_rebalance(fund: &FundState, idle: u64, invested: &[u64]) -> Result<RebalancePlan> {
    require!(
        invested.len() == fund.strategies.len(),
        FundError::StrategyAccountMismatch
    );

    let mut balances = invested.to_vec();
    let (divests, invests, idle_after) = rebalance_pass(fund, idle, &mut balances)?;

    let mut new_principals: Vec<u64> = fund
        .strategies
        .iter()
        .map(|s| s.allocated_principal)
        .collect();
    for mv in &divests {
        new_principals[mv.strategy_index] =
            new_principals[mv.strategy_index].saturating_sub(mv.amount);
    }
    for mv in &invests {
        new_principals[mv.strategy_index] = new_principals[mv.strategy_index]
            .checked_add(mv.amount)
            .ok_or(FundError::MathOverflow)?;
    }

    Ok(RebalancePlan {
        divests,
        invests,
        new_principals,
        idle_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StrategyEntry;

    fn mock_fund() -> FundState {
        let governance = Pubkey::new_unique();
        FundState {
            proxy: Pubkey::new_unique(),
            governance,
            pending_governance: Pubkey::default(),
            fund_manager: governance,
            rewards: governance,
            platform_rewards: governance,
            underlying_mint: Pubkey::new_unique(),
            name: "Generic Fund".to_string(),
            symbol: "GF".to_string(),
            decimals: 6,
            underlying_unit: 1_000_000,
            deposit_limit: 0,
            deposit_limit_tx_max: 0,
            deposit_limit_tx_min: 0,
            deposits_paused: false,
            performance_fee_fund_bps: 0,
            platform_fee_bps: 0,
            withdrawal_fee_bps: 0,
            total_shares: 0,
            holdings: Vec::new(),
            allowances: Vec::new(),
            strategies: Vec::new(),
            should_rebalance: false,
            last_hard_work_ts: 0,
            locked: false,
            bump: 255,
            authority_bump: 255,
        }
    }

    fn add_strategy(fund: &mut FundState, weightage_bps: u16, fee_bps: u16) -> Pubkey {
        let key = Pubkey::new_unique();
        fund.strategies.push(StrategyEntry {
            strategy: key,
            weightage_bps,
            performance_fee_bps: fee_bps,
            allocated_principal: 0,
        });
        key
    }

    #[test]
    fn first_hard_work_invests_to_target_with_zero_profit() {
        let mut fund = mock_fund();
        fund.total_shares = 50_000_000;
        add_strategy(&mut fund, 5_000, 500);

        let plan = plan_hard_work(&fund, 50_000_000, &[0], 0).unwrap();

        assert_eq!(plan.reports[0].profit, 0);
        assert_eq!(plan.reports[0].strategy_creator_fee, 0);
        assert_eq!(plan.reports[0].fund_fee, 0);
        assert_eq!(plan.invests, vec![CapitalMove { strategy_index: 0, amount: 25_000_000 }]);
        assert!(plan.divests.is_empty());
        assert_eq!(plan.reports[0].new_principal, 25_000_000);
        assert_eq!(plan.idle_after, 25_000_000);
        assert_eq!(plan.price_per_share_after, fund.underlying_unit as u128);
    }

    #[test]
    fn realized_profit_moves_the_share_price() {
        // 50m deposited, strategy at 50% weightage
        // realizes 10% on its 25m allocation
        let mut fund = mock_fund();
        fund.total_shares = 50_000_000;
        add_strategy(&mut fund, 5_000, 0);
        fund.strategies[0].allocated_principal = 25_000_000;

        let price = fund.price_per_share(25_000_000 + 27_500_000).unwrap();
        assert_eq!(
            price,
            fund.underlying_unit as u128 * 52_500_000 / 50_000_000
        );
    }

    #[test]
    fn fee_waterfall_on_harvested_profit() {
        let mut fund = mock_fund();
        fund.total_shares = 50_000_000;
        fund.performance_fee_fund_bps = 500;
        add_strategy(&mut fund, 5_000, 500);
        fund.strategies[0].allocated_principal = 25_000_000;

        // strategy made 10%
        let plan = plan_hard_work(&fund, 25_000_000, &[27_500_000], 0).unwrap();
        let report = &plan.reports[0];

        assert_eq!(report.profit, 2_500_000);
        assert_eq!(report.strategy_creator_fee, 125_000);
        // fund fee applies to profit net of the creator fee
        assert_eq!(report.fund_fee, (2_500_000 - 125_000) * 500 / 10_000);

        // fees left the system, remaining profit compounded
        let total = plan.total_assets_after;
        assert_eq!(
            total,
            52_500_000 - report.strategy_creator_fee - report.fund_fee
        );
        assert_eq!(
            plan.price_per_share_after,
            fund.price_per_share(total).unwrap()
        );
    }

    #[test]
    fn losses_produce_no_fees_and_no_negative_profit() {
        let mut fund = mock_fund();
        fund.total_shares = 1_000_000;
        fund.performance_fee_fund_bps = 1_000;
        add_strategy(&mut fund, 5_000, 1_000);
        fund.strategies[0].allocated_principal = 500_000;

        let plan = plan_hard_work(&fund, 500_000, &[400_000], 0).unwrap();
        assert_eq!(plan.reports[0].profit, 0);
        assert_eq!(plan.reports[0].strategy_creator_fee, 0);
        assert_eq!(plan.reports[0].fund_fee, 0);
        assert_eq!(plan.total_assets_after, 900_000);
    }

    #[test]
    fn strategies_processed_in_registration_order() {
        let mut fund = mock_fund();
        fund.total_shares = 50_000_000;
        add_strategy(&mut fund, 5_000, 500);
        add_strategy(&mut fund, 2_000, 500);

        let plan = plan_hard_work(&fund, 50_000_000, &[0, 0], 0).unwrap();
        assert_eq!(
            plan.invests,
            vec![
                CapitalMove { strategy_index: 0, amount: 25_000_000 },
                CapitalMove { strategy_index: 1, amount: 10_000_000 },
            ]
        );
        // 30% stays idle for withdrawal demand
        assert_eq!(plan.idle_after, 15_000_000);
    }

    #[test]
    fn weightage_decrease_divests_excess_back_to_idle() {
        let mut fund = mock_fund();
        fund.total_shares = 10_000_000;
        let s = add_strategy(&mut fund, 2_000, 0);
        fund.strategies[0].allocated_principal = 5_000_000;
        let _ = s;

        let plan = plan_rebalance(&fund, 5_000_000, &[5_000_000]).unwrap();
        // target is 20% of 10m
        assert_eq!(plan.divests, vec![CapitalMove { strategy_index: 0, amount: 3_000_000 }]);
        assert!(plan.invests.is_empty());
        assert_eq!(plan.new_principals, vec![2_000_000]);
        assert_eq!(plan.idle_after, 8_000_000);
    }

    #[test]
    fn scarce_idle_fills_strategies_in_order() {
        let mut fund = mock_fund();
        fund.total_shares = 10_000_000;
        add_strategy(&mut fund, 5_000, 0);
        add_strategy(&mut fund, 4_000, 0);

        // most capital already sits in strategy 0; idle cannot fund
        // both targets, so the earlier registration wins first
        let plan = plan_rebalance(&fund, 1_000_000, &[6_000_000, 3_000_000]).unwrap();
        // total 10m: targets are 5m and 4m
        assert_eq!(plan.divests, vec![CapitalMove { strategy_index: 0, amount: 1_000_000 }]);
        assert_eq!(plan.invests, vec![CapitalMove { strategy_index: 1, amount: 1_000_000 }]);
        assert_eq!(plan.idle_after, 1_000_000);
    }

    #[test]
    fn platform_fee_accrues_over_elapsed_time() {
        let mut fund = mock_fund();
        fund.total_shares = 10_000_000;
        fund.platform_fee_bps = 100; // 1% per year
        fund.last_hard_work_ts = 0;
        add_strategy(&mut fund, 5_000, 0);
        fund.strategies[0].allocated_principal = 5_000_000;

        // half a year on 10m at 1% = 50_000
        let plan = plan_hard_work(
            &fund,
            5_000_000,
            &[5_000_000],
            SECONDS_PER_YEAR / 2,
        )
        .unwrap();
        assert_eq!(plan.platform_fee, 50_000);
        assert_eq!(plan.total_assets_after, 9_950_000);
    }

    #[test]
    fn platform_fee_is_capped_by_idle_balance() {
        let mut fund = mock_fund();
        fund.total_shares = 10_000_000;
        fund.platform_fee_bps = 4_999;
        fund.last_hard_work_ts = 0;
        add_strategy(&mut fund, 9_000, 0);
        fund.strategies[0].allocated_principal = 9_999_000;

        let plan = plan_hard_work(&fund, 1_000, &[9_999_000], 100 * SECONDS_PER_YEAR).unwrap();
        assert!(plan.platform_fee <= 1_000);
    }

    #[test]
    fn zero_elapsed_time_accrues_nothing() {
        let mut fund = mock_fund();
        fund.total_shares = 10_000_000;
        fund.platform_fee_bps = 100;
        fund.last_hard_work_ts = 1_000;

        let plan = plan_hard_work(&fund, 10_000_000, &[], 1_000).unwrap();
        assert_eq!(plan.platform_fee, 0);
    }

    #[test]
    fn mismatched_snapshot_length_is_rejected() {
        let mut fund = mock_fund();
        add_strategy(&mut fund, 5_000, 0);
        assert!(plan_hard_work(&fund, 0, &[], 0).is_err());
        assert!(plan_rebalance(&fund, 0, &[0, 0]).is_err());
    }
}
