use anchor_lang::prelude::*;

/// Custom error codes for the Pooled Fund program
///
/// Grouped by taxonomy: authorization, validation, state, and math.
/// Collaborator failures (SPL token CPIs) propagate verbatim and are
/// not wrapped here.
#[error_code]
pub enum FundError {
    // --- authorization ---
    #[msg("Not governance")]
    NotGovernance,

    #[msg("Not governance nor fund manager")]
    NotGovernanceNorFundManager,

    #[msg("Not the pending governance candidate")]
    NotPendingGovernance,

    #[msg("Issue when finalizing the upgrade")]
    UpgradeFailed,

    // --- validation ---
    #[msg("The strategy does not belong to this fund")]
    StrategyNotOwnedByFund,

    #[msg("The weightage should be greater than 0")]
    ZeroWeightage,

    #[msg("Total investment can't be above 90%")]
    WeightageCapExceeded,

    #[msg("Performance fee too high")]
    PerformanceFeeTooHigh,

    #[msg("Fee greater than max limit")]
    FeeTooHigh,

    #[msg("This strategy is already active in this fund")]
    StrategyAlreadyActive,

    #[msg("This strategy is not active in this fund")]
    StrategyNotActive,

    #[msg("Strategy registry is full")]
    RegistryFull,

    #[msg("Invalid token mint - does not match fund underlying")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Fund name too long")]
    NameTooLong,

    #[msg("Fund symbol too long")]
    SymbolTooLong,

    #[msg("Pending governance candidate cannot be the zero address")]
    InvalidGovernanceCandidate,

    // --- state ---
    #[msg("Deposits are paused")]
    DepositsPaused,

    #[msg("Deposit amount must be greater than zero")]
    ZeroDepositAmount,

    #[msg("Deposit would exceed the fund deposit limit")]
    DepositLimitReached,

    #[msg("Deposit amount above per-transaction maximum")]
    DepositAboveTxMax,

    #[msg("Deposit amount below per-transaction minimum")]
    DepositBelowTxMin,

    #[msg("Fund has no shares")]
    NoShares,

    #[msg("Burn amount exceeds balance")]
    BurnExceedsBalance,

    #[msg("Transfer amount exceeds balance")]
    InsufficientBalance,

    #[msg("Transfer amount exceeds allowance")]
    InsufficientAllowance,

    #[msg("Not enough idle balance to service the withdrawal")]
    InsufficientLiquidity,

    #[msg("Reentrant call rejected")]
    Reentrancy,

    #[msg("Shareholder table is full")]
    HolderTableFull,

    #[msg("Allowance table is full")]
    AllowanceTableFull,

    #[msg("Strategy accounts do not match the registry")]
    StrategyAccountMismatch,

    // --- math ---
    #[msg("Math overflow occurred during calculation")]
    MathOverflow,
}
