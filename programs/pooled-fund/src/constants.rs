// Constants for the Pooled Fund program

/// Seed for the fund factory PDA
pub const FACTORY_SEED: &[u8] = b"fund_factory";

/// Seed for fund proxy PDAs (one per created fund)
pub const FUND_PROXY_SEED: &[u8] = b"fund_proxy";

/// Seed for fund state PDAs
pub const FUND_SEED: &[u8] = b"fund";

/// Seed for the fund authority PDA that owns the idle and strategy
/// custody token accounts
pub const FUND_AUTHORITY_SEED: &[u8] = b"fund_authority";

/// Seed for implementation manifest PDAs
pub const IMPLEMENTATION_SEED: &[u8] = b"implementation";

/// Capability tag an implementation manifest must advertise before the
/// factory deploys it or the proxy upgrades to it
pub const FUND_CAPABILITY: [u8; 8] = *b"FUNDv1__";

/// Denominator for all basis-point arithmetic (weightage and fees)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fees (withdrawal, platform, fund and strategy performance) must stay
/// strictly below 50%
pub const MAX_FEE_BPS: u16 = 5_000;

/// Cumulative strategy weightage is capped at 90%; the rest stays idle
/// to service withdrawals
pub const MAX_TOTAL_WEIGHTAGE_BPS: u16 = 9_000;

/// Platform fee accrues pro rata over a 365-day year
pub const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Maximum active strategies per fund before the state account is full
pub const MAX_STRATEGIES: usize = 10;

/// Maximum distinct shareholders tracked in the in-state ledger
pub const MAX_HOLDERS: usize = 64;

/// Maximum live (owner, spender) allowance pairs
pub const MAX_ALLOWANCES: usize = 64;

/// Maximum fund name / symbol lengths stored in state
pub const MAX_NAME_LEN: usize = 64;
pub const MAX_SYMBOL_LEN: usize = 16;
