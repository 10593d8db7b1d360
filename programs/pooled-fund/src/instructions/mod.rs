use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::errors::FundError;
use crate::state::FundState;

pub mod create_fund;
pub mod deposit;
pub mod do_hard_work;
pub mod governance;
pub mod initialize_factory;
pub mod rebalance;
pub mod register_implementation;
pub mod settings;
pub mod share_ledger;
pub mod strategies;
pub mod upgrade;
pub mod withdraw;

pub use create_fund::*;
pub use deposit::*;
pub use do_hard_work::*;
pub use governance::*;
pub use initialize_factory::*;
pub use rebalance::*;
pub use register_implementation::*;
pub use settings::*;
pub use share_ledger::*;
pub use strategies::*;
pub use upgrade::*;
pub use withdraw::*;

/// Read the live custody balance of every registered strategy
///
/// Callers pass the strategy custody token accounts as remaining
/// accounts, in registration order; anything out of order or missing
/// fails the whole instruction. The keys were validated against the
/// fund authority when the strategies were registered, so matching
/// them against the registry here is sufficient.
pub(crate) fn strategy_balances(fund: &FundState, accounts: &[AccountInfo]) -> Result<Vec<u64>> {
    require!(
        accounts.len() == fund.strategies.len(),
        FundError::StrategyAccountMismatch
    );
    let mut balances = Vec::with_capacity(accounts.len());
    for (entry, info) in fund.strategies.iter().zip(accounts.iter()) {
        require_keys_eq!(
            *info.key,
            entry.strategy,
            FundError::StrategyAccountMismatch
        );
        let data = info.try_borrow_data()?;
        let custody = TokenAccount::try_deserialize(&mut &data[..])?;
        balances.push(custody.amount);
    }
    Ok(balances)
}

/// Total assets = idle balance + live strategy balances
pub(crate) fn total_assets(idle: u64, invested: &[u64]) -> Result<u64> {
    invested
        .iter()
        .try_fold(idle, |acc, b| acc.checked_add(*b))
        .ok_or(error!(FundError::MathOverflow))
}
