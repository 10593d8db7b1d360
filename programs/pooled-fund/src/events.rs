use anchor_lang::prelude::*;

/// Event emitted when the factory deploys a new fund proxy
#[event]
pub struct NewFund {
    pub fund_proxy: Pubkey,
    pub fund: Pubkey,
    pub implementation: Pubkey,
    pub underlying_mint: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a two-step governance transfer completes
#[event]
pub struct GovernanceUpdated {
    pub governance: Pubkey,
}

/// Event emitted when assets are deposited for shares
#[event]
pub struct Deposit {
    pub fund: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
    pub timestamp: i64,
}

/// Event emitted when shares are redeemed for assets
#[event]
pub struct Withdraw {
    pub fund: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub timestamp: i64,
}

/// Share ledger transfer
#[event]
pub struct Transfer {
    pub fund: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

/// Share ledger approval (overwrite semantics)
#[event]
pub struct Approval {
    pub fund: Pubkey,
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub amount: u64,
}

/// Event emitted when a strategy joins the registry
#[event]
pub struct StrategyAdded {
    pub fund: Pubkey,
    pub strategy: Pubkey,
    pub weightage_bps: u16,
    pub performance_fee_bps: u16,
    pub timestamp: i64,
}

/// Event emitted when a strategy is divested and removed
#[event]
pub struct StrategyRemoved {
    pub fund: Pubkey,
    pub strategy: Pubkey,
    pub divested: u64,
    pub timestamp: i64,
}

/// Per-strategy harvest report, one per active strategy per hard work
///
/// Single five-field shape; the fund-level performance fee is carried
/// here rather than in a separate aggregate event.
#[event]
pub struct StrategyProfit {
    pub strategy: Pubkey,
    pub profit: u64,
    pub strategy_creator_fee: u64,
    pub fund_fee: u64,
    pub timestamp: i64,
}

/// Aggregate hard work summary, emitted exactly once per invocation
#[event]
pub struct HardWorkDone {
    pub fund: Pubkey,
    pub idle_balance: u64,
    pub price_per_share: u128,
    pub platform_fee: u64,
    pub timestamp: i64,
}

/// Capital moved between idle balance and a strategy during rebalance
#[event]
pub struct Rebalanced {
    pub fund: Pubkey,
    pub invested: u64,
    pub divested: u64,
    pub timestamp: i64,
}
