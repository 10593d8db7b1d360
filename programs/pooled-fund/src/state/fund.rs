use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::FundError;

/// Per-fund state, fronted by a [`crate::state::FundProxy`]
///
/// One PDA exclusively owns every piece of fund state: the internal
/// share ledger, the strategy registry, fee configuration and the
/// governance roles. Logic upgrades swap the proxy's implementation
/// pointer and never touch this account.
#[account]
pub struct FundState {
    /// Proxy fronting this fund
    pub proxy: Pubkey,

    /// Current governance and, during a two-step transfer, the
    /// candidate that may accept it (zero = no transfer pending)
    pub governance: Pubkey,
    pub pending_governance: Pubkey,

    /// Operational role allowed to run hard work and admin setters
    pub fund_manager: Pubkey,

    /// Recipients of the fund performance / withdrawal fees and the
    /// platform fee; both default to governance
    pub rewards: Pubkey,
    pub platform_rewards: Pubkey,

    /// Mint of the underlying asset
    pub underlying_mint: Pubkey,

    /// Share token metadata
    pub name: String,
    pub symbol: String,
    pub decimals: u8,

    /// One whole underlying unit, 10^decimals
    pub underlying_unit: u64,

    /// Deposit guards: 0 means unlimited / no bound
    pub deposit_limit: u64,
    pub deposit_limit_tx_max: u64,
    pub deposit_limit_tx_min: u64,
    pub deposits_paused: bool,

    /// Fee configuration in basis points, each strictly below
    /// [`MAX_FEE_BPS`]
    pub performance_fee_fund_bps: u16,
    pub platform_fee_bps: u16,
    pub withdrawal_fee_bps: u16,

    /// Internal share ledger
    /// Max [`MAX_HOLDERS`] holders before hitting account size limits
    pub total_shares: u64,
    pub holdings: Vec<ShareHolding>,
    pub allowances: Vec<ShareAllowance>,

    /// Active strategies in registration order; the order drives the
    /// hard work and rebalance passes
    pub strategies: Vec<StrategyEntry>,

    /// Manual rebalance trigger, cleared when the pass runs
    pub should_rebalance: bool,

    /// Timestamp of the last platform fee accrual
    pub last_hard_work_ts: i64,

    /// Reentrancy guard for every state-mutating entry point
    pub locked: bool,

    /// Bump seeds for the state and authority PDAs
    pub bump: u8,
    pub authority_bump: u8,
}

/// One shareholder row of the in-state ledger
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ShareHolding {
    pub holder: Pubkey,
    pub amount: u64,
}

/// One (owner, spender) allowance row; overwrite semantics
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ShareAllowance {
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub amount: u64,
}

/// Registered strategy entry
///
/// `strategy` is the custody token account the fund delegates capital
/// to; it must be owned by the fund authority PDA and hold the
/// underlying mint. `allocated_principal` is the cost basis used to
/// measure harvested profit.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct StrategyEntry {
    pub strategy: Pubkey,
    pub weightage_bps: u16,
    pub performance_fee_bps: u16,
    pub allocated_principal: u64,
}

impl FundState {
    /// Space calculation:
    /// 8 (discriminator) + 7 * 32 (pubkeys) + (4 + 64) name +
    /// (4 + 16) symbol + 1 decimals + 8 unit + 3 * 8 limits + 1 paused +
    /// 3 * 2 fees + 8 total_shares +
    /// (4 + 64 * 40) holdings + (4 + 64 * 72) allowances +
    /// (4 + 10 * 44) strategies + 1 + 8 + 1 + 2 bumps + 128 padding
    pub const SPACE: usize = 8
        + 7 * 32
        + (4 + MAX_NAME_LEN)
        + (4 + MAX_SYMBOL_LEN)
        + 1
        + 8
        + 3 * 8
        + 1
        + 3 * 2
        + 8
        + (4 + MAX_HOLDERS * 40)
        + (4 + MAX_ALLOWANCES * 72)
        + (4 + MAX_STRATEGIES * 44)
        + 1
        + 8
        + 1
        + 2
        + 128;

    // ------------------------------------------------------------------
    // roles
    // ------------------------------------------------------------------

    pub fn require_governance(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.governance, FundError::NotGovernance);
        Ok(())
    }

    pub fn require_governance_or_manager(&self, caller: &Pubkey) -> Result<()> {
        require!(
            *caller == self.governance || *caller == self.fund_manager,
            FundError::NotGovernanceNorFundManager
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // two-step governance
    // ------------------------------------------------------------------

    pub fn update_governance(&mut self, caller: &Pubkey, candidate: Pubkey) -> Result<()> {
        self.require_governance(caller)?;
        require!(
            candidate != Pubkey::default(),
            FundError::InvalidGovernanceCandidate
        );
        self.pending_governance = candidate;
        Ok(())
    }

    pub fn accept_governance(&mut self, caller: &Pubkey) -> Result<()> {
        require!(
            self.pending_governance != Pubkey::default() && *caller == self.pending_governance,
            FundError::NotPendingGovernance
        );
        self.governance = self.pending_governance;
        self.pending_governance = Pubkey::default();
        Ok(())
    }

    // ------------------------------------------------------------------
    // reentrancy guard
    // ------------------------------------------------------------------

    // named to stay clear of Anchor's AccountsExit::exit
    pub fn enter_guard(&mut self) -> Result<()> {
        require!(!self.locked, FundError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn exit_guard(&mut self) {
        self.locked = false;
    }

    // ------------------------------------------------------------------
    // share ledger
    // ------------------------------------------------------------------

    pub fn balance_of(&self, holder: &Pubkey) -> u64 {
        self.holdings
            .iter()
            .find(|h| h.holder == *holder)
            .map(|h| h.amount)
            .unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.allowances
            .iter()
            .find(|a| a.owner == *owner && a.spender == *spender)
            .map(|a| a.amount)
            .unwrap_or(0)
    }

    fn credit(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        if let Some(h) = self.holdings.iter_mut().find(|h| h.holder == *holder) {
            h.amount = h.amount.checked_add(amount).ok_or(FundError::MathOverflow)?;
            return Ok(());
        }
        require!(self.holdings.len() < MAX_HOLDERS, FundError::HolderTableFull);
        self.holdings.push(ShareHolding {
            holder: *holder,
            amount,
        });
        Ok(())
    }

    fn debit(&mut self, holder: &Pubkey, amount: u64, err: FundError) -> Result<()> {
        let pos = self.holdings.iter().position(|h| h.holder == *holder);
        let Some(pos) = pos else {
            // unknown holder, zero balance
            if amount == 0 {
                return Ok(());
            }
            return Err(err.into());
        };
        let balance = self.holdings[pos].amount;
        if balance < amount {
            return Err(err.into());
        }
        if balance == amount {
            self.holdings.remove(pos);
        } else {
            self.holdings[pos].amount = balance - amount;
        }
        Ok(())
    }

    /// Internal-only, invoked by deposit
    pub fn mint_shares(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        self.credit(holder, amount)?;
        self.total_shares = self
            .total_shares
            .checked_add(amount)
            .ok_or(FundError::MathOverflow)?;
        Ok(())
    }

    /// Internal-only, invoked by withdraw
    pub fn burn_shares(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        self.debit(holder, amount, FundError::BurnExceedsBalance)?;
        self.total_shares = self
            .total_shares
            .checked_sub(amount)
            .ok_or(FundError::MathOverflow)?;
        Ok(())
    }

    pub fn transfer_shares(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        if from == to || amount == 0 {
            // self-transfers and zero transfers succeed without touching
            // the table, but still require a sufficient balance
            require!(
                self.balance_of(from) >= amount,
                FundError::InsufficientBalance
            );
            return Ok(());
        }
        self.debit(from, amount, FundError::InsufficientBalance)?;
        self.credit(to, amount)
    }

    pub fn approve_shares(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        if let Some(a) = self
            .allowances
            .iter_mut()
            .find(|a| a.owner == *owner && a.spender == *spender)
        {
            a.amount = amount;
            return Ok(());
        }
        if amount == 0 {
            return Ok(());
        }
        require!(
            self.allowances.len() < MAX_ALLOWANCES,
            FundError::AllowanceTableFull
        );
        self.allowances.push(ShareAllowance {
            owner: *owner,
            spender: *spender,
            amount,
        });
        Ok(())
    }

    pub fn spend_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        let pos = self
            .allowances
            .iter()
            .position(|a| a.owner == *owner && a.spender == *spender);
        let Some(pos) = pos else {
            require!(amount == 0, FundError::InsufficientAllowance);
            return Ok(());
        };
        let current = self.allowances[pos].amount;
        require!(current >= amount, FundError::InsufficientAllowance);
        if current == amount {
            self.allowances.remove(pos);
        } else {
            self.allowances[pos].amount = current - amount;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // share price math
    // ------------------------------------------------------------------

    /// Shares minted for `amount` of underlying against the pre-deposit
    /// asset total; first deposit bootstraps at one share per unit
    pub fn calculate_shares(&self, amount: u64, total_assets_before: u64) -> Result<u64> {
        if self.total_shares == 0 || total_assets_before == 0 {
            return Ok(amount);
        }

        let shares = (amount as u128)
            .checked_mul(self.total_shares as u128)
            .ok_or(FundError::MathOverflow)?
            .checked_div(total_assets_before as u128)
            .ok_or(FundError::MathOverflow)?;

        u64::try_from(shares).map_err(|_| error!(FundError::MathOverflow))
    }

    /// Gross redemption value, withdrawal fee and net payout for a
    /// share amount against the pre-withdrawal asset total
    pub fn calculate_withdrawal(&self, shares: u64, total_assets_before: u64) -> Result<(u64, u64, u64)> {
        require!(self.total_shares > 0, FundError::NoShares);

        let gross = (shares as u128)
            .checked_mul(total_assets_before as u128)
            .ok_or(FundError::MathOverflow)?
            .checked_div(self.total_shares as u128)
            .ok_or(FundError::MathOverflow)?;
        let gross = u64::try_from(gross).map_err(|_| error!(FundError::MathOverflow))?;

        let fee = (gross as u128)
            .checked_mul(self.withdrawal_fee_bps as u128)
            .ok_or(FundError::MathOverflow)?
            / BPS_DENOMINATOR as u128;
        let fee = fee as u64;

        Ok((gross, fee, gross - fee))
    }

    /// Net asset value per share, `underlying_unit` for an empty fund
    pub fn price_per_share(&self, total_assets: u64) -> Result<u128> {
        if self.total_shares == 0 {
            return Ok(self.underlying_unit as u128);
        }
        (total_assets as u128)
            .checked_mul(self.underlying_unit as u128)
            .ok_or(FundError::MathOverflow)?
            .checked_div(self.total_shares as u128)
            .ok_or(error!(FundError::MathOverflow))
    }

    /// Deposit guards: pause flag, per-tx bounds, cumulative limit
    pub fn check_deposit(&self, amount: u64, total_assets_before: u64) -> Result<()> {
        require!(!self.deposits_paused, FundError::DepositsPaused);
        require!(amount > 0, FundError::ZeroDepositAmount);
        if self.deposit_limit_tx_max > 0 {
            require!(amount <= self.deposit_limit_tx_max, FundError::DepositAboveTxMax);
        }
        if self.deposit_limit_tx_min > 0 {
            require!(amount >= self.deposit_limit_tx_min, FundError::DepositBelowTxMin);
        }
        if self.deposit_limit > 0 {
            let after = (total_assets_before as u128) + (amount as u128);
            require!(
                after <= self.deposit_limit as u128,
                FundError::DepositLimitReached
            );
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // strategy registry
    // ------------------------------------------------------------------

    pub fn total_weightage_bps(&self) -> u16 {
        self.strategies.iter().map(|s| s.weightage_bps).sum()
    }

    pub fn strategy_index(&self, strategy: &Pubkey) -> Option<usize> {
        self.strategies.iter().position(|s| s.strategy == *strategy)
    }

    pub fn get_strategy(&self, strategy: &Pubkey) -> Option<&StrategyEntry> {
        self.strategies.iter().find(|s| s.strategy == *strategy)
    }

    pub fn strategy_list(&self) -> Vec<Pubkey> {
        self.strategies.iter().map(|s| s.strategy).collect()
    }

    /// Appends at the tail; re-adding a removed strategy lands after
    /// every surviving entry
    pub fn add_strategy_entry(
        &mut self,
        strategy: Pubkey,
        weightage_bps: u16,
        performance_fee_bps: u16,
    ) -> Result<()> {
        require!(weightage_bps > 0, FundError::ZeroWeightage);
        require!(
            performance_fee_bps < MAX_FEE_BPS,
            FundError::PerformanceFeeTooHigh
        );
        require!(
            self.strategy_index(&strategy).is_none(),
            FundError::StrategyAlreadyActive
        );
        require!(
            self.strategies.len() < MAX_STRATEGIES,
            FundError::RegistryFull
        );
        // widened so an oversized argument fails the cap instead of
        // wrapping the sum
        require!(
            self.total_weightage_bps() as u32 + weightage_bps as u32
                <= MAX_TOTAL_WEIGHTAGE_BPS as u32,
            FundError::WeightageCapExceeded
        );

        self.strategies.push(StrategyEntry {
            strategy,
            weightage_bps,
            performance_fee_bps,
            allocated_principal: 0,
        });
        Ok(())
    }

    /// Order-preserving removal (not swap-to-end): `[A, B, C]` minus
    /// `B` yields `[A, C]`
    pub fn remove_strategy_entry(&mut self, strategy: &Pubkey) -> Result<StrategyEntry> {
        let idx = self
            .strategy_index(strategy)
            .ok_or(FundError::StrategyNotActive)?;
        Ok(self.strategies.remove(idx))
    }

    pub fn update_strategy_weightage(&mut self, strategy: &Pubkey, weightage_bps: u16) -> Result<()> {
        let idx = self
            .strategy_index(strategy)
            .ok_or(FundError::StrategyNotActive)?;
        require!(weightage_bps > 0, FundError::ZeroWeightage);
        let others: u32 = self
            .strategies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, s)| s.weightage_bps as u32)
            .sum();
        require!(
            others + weightage_bps as u32 <= MAX_TOTAL_WEIGHTAGE_BPS as u32,
            FundError::WeightageCapExceeded
        );
        self.strategies[idx].weightage_bps = weightage_bps;
        Ok(())
    }

    pub fn update_strategy_performance_fee(
        &mut self,
        strategy: &Pubkey,
        performance_fee_bps: u16,
    ) -> Result<()> {
        let idx = self
            .strategy_index(strategy)
            .ok_or(FundError::StrategyNotActive)?;
        require!(
            performance_fee_bps < MAX_FEE_BPS,
            FundError::PerformanceFeeTooHigh
        );
        self.strategies[idx].performance_fee_bps = performance_fee_bps;
        Ok(())
    }

    /// Ledger invariant, asserted by tests after every scenario
    pub fn ledger_consistent(&self) -> bool {
        let sum: u128 = self.holdings.iter().map(|h| h.amount as u128).sum();
        sum == self.total_shares as u128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn mock_fund() -> FundState {
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

    #[test]
    fn first_deposit_is_one_to_one() {
        let fund = mock_fund();
        assert_eq!(fund.calculate_shares(1_000, 0).unwrap(), 1_000);
    }

    #[test]
    fn subsequent_deposit_is_proportional() {
        let mut fund = mock_fund();
        fund.total_shares = 1_000;
        // fund made 100% profit, new depositor pays double per share
        assert_eq!(fund.calculate_shares(500, 2_000).unwrap(), 250);
    }

    #[test]
    fn price_per_share_empty_fund_is_unit() {
        let fund = mock_fund();
        assert_eq!(fund.price_per_share(0).unwrap(), 1_000_000);
    }

    #[test]
    fn withdrawal_fee_is_taken_from_gross() {
        let mut fund = mock_fund();
        fund.total_shares = 5_000_000;
        fund.withdrawal_fee_bps = 50;
        let (gross, fee, net) = fund.calculate_withdrawal(5_000_000, 5_000_000).unwrap();
        assert_eq!(gross, 5_000_000);
        assert_eq!(fee, 25_000);
        assert_eq!(net, 4_975_000);
    }

    #[test]
    fn withdrawal_from_empty_fund_fails() {
        let fund = mock_fund();
        assert!(fund.calculate_withdrawal(50, 0).is_err());
    }

    #[test]
    fn mint_transfer_burn_preserve_total() {
        let mut fund = mock_fund();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());

        fund.mint_shares(&a, 100).unwrap();
        fund.transfer_shares(&a, &b, 40).unwrap();
        fund.burn_shares(&b, 10).unwrap();

        assert_eq!(fund.balance_of(&a), 60);
        assert_eq!(fund.balance_of(&b), 30);
        assert_eq!(fund.total_shares, 90);
        assert!(fund.ledger_consistent());
    }

    #[test]
    fn transfer_beyond_balance_fails() {
        let mut fund = mock_fund();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        fund.mint_shares(&a, 100).unwrap();
        assert!(fund.transfer_shares(&a, &b, 101).is_err());
        assert_eq!(fund.balance_of(&a), 100);
    }

    #[test]
    fn transfer_to_self_keeps_balance() {
        let mut fund = mock_fund();
        let a = Pubkey::new_unique();
        fund.mint_shares(&a, 100).unwrap();
        fund.transfer_shares(&a, &a, 25).unwrap();
        assert_eq!(fund.balance_of(&a), 100);
        assert!(fund.ledger_consistent());
    }

    #[test]
    fn approval_overwrites_and_revokes() {
        let mut fund = mock_fund();
        let (owner, spender) = (Pubkey::new_unique(), Pubkey::new_unique());

        fund.approve_shares(&owner, &spender, 10_000).unwrap();
        assert_eq!(fund.allowance(&owner, &spender), 10_000);

        fund.approve_shares(&owner, &spender, 123).unwrap();
        assert_eq!(fund.allowance(&owner, &spender), 123);

        fund.approve_shares(&owner, &spender, 0).unwrap();
        assert_eq!(fund.allowance(&owner, &spender), 0);
        // reverse direction untouched
        assert_eq!(fund.allowance(&spender, &owner), 0);
    }

    #[test]
    fn spend_allowance_enforces_limit() {
        let mut fund = mock_fund();
        let (owner, spender) = (Pubkey::new_unique(), Pubkey::new_unique());
        fund.approve_shares(&owner, &spender, 50).unwrap();
        fund.spend_allowance(&owner, &spender, 30).unwrap();
        assert_eq!(fund.allowance(&owner, &spender), 20);
        assert!(fund.spend_allowance(&owner, &spender, 21).is_err());
    }

    #[test]
    fn weightage_cap_rejects_excess() {
        let mut fund = mock_fund();
        fund.add_strategy_entry(Pubkey::new_unique(), 5_000, 500).unwrap();
        let err = fund
            .add_strategy_entry(Pubkey::new_unique(), 4_500, 500)
            .unwrap_err();
        assert_eq!(err, FundError::WeightageCapExceeded.into());
        assert_eq!(fund.strategies.len(), 1);
        assert_eq!(fund.total_weightage_bps(), 5_000);
    }

    #[test]
    fn add_strategy_rejects_zero_weightage_and_high_fee() {
        let mut fund = mock_fund();
        assert!(fund.add_strategy_entry(Pubkey::new_unique(), 0, 500).is_err());
        assert!(fund
            .add_strategy_entry(Pubkey::new_unique(), 5_000, 5_000)
            .is_err());
        assert!(fund.strategies.is_empty());
    }

    #[test]
    fn duplicate_strategy_rejected() {
        let mut fund = mock_fund();
        let s = Pubkey::new_unique();
        fund.add_strategy_entry(s, 5_000, 500).unwrap();
        let err = fund.add_strategy_entry(s, 1_000, 500).unwrap_err();
        assert_eq!(err, FundError::StrategyAlreadyActive.into());
    }

    #[test]
    fn removal_preserves_order_and_readd_appends() {
        let mut fund = mock_fund();
        let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        fund.add_strategy_entry(a, 5_000, 500).unwrap();
        fund.add_strategy_entry(b, 2_000, 500).unwrap();
        fund.add_strategy_entry(c, 1_000, 500).unwrap();

        fund.remove_strategy_entry(&b).unwrap();
        assert_eq!(fund.strategy_list(), vec![a, c]);

        fund.add_strategy_entry(b, 2_000, 500).unwrap();
        assert_eq!(fund.strategy_list(), vec![a, c, b]);
    }

    #[test]
    fn oversized_weightage_fails_the_cap_instead_of_wrapping() {
        let mut fund = mock_fund();
        fund.add_strategy_entry(Pubkey::new_unique(), 9_000, 0).unwrap();

        // 9_000 + 60_000 does not fit in u16; must still reject cleanly
        let err = fund
            .add_strategy_entry(Pubkey::new_unique(), 60_000, 0)
            .unwrap_err();
        assert_eq!(err, FundError::WeightageCapExceeded.into());
        assert_eq!(fund.strategies.len(), 1);
        assert_eq!(fund.total_weightage_bps(), 9_000);
    }

    #[test]
    fn oversized_weightage_update_fails_the_cap_instead_of_wrapping() {
        let mut fund = mock_fund();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        fund.add_strategy_entry(a, 5_000, 0).unwrap();
        fund.add_strategy_entry(b, 4_000, 0).unwrap();

        let err = fund.update_strategy_weightage(&a, 65_000).unwrap_err();
        assert_eq!(err, FundError::WeightageCapExceeded.into());
        assert_eq!(fund.get_strategy(&a).unwrap().weightage_bps, 5_000);
    }

    #[test]
    fn update_weightage_respects_cap() {
        let mut fund = mock_fund();
        let s = Pubkey::new_unique();
        fund.add_strategy_entry(s, 5_000, 500).unwrap();
        assert!(fund.update_strategy_weightage(&s, 9_500).is_err());
        fund.update_strategy_weightage(&s, 6_000).unwrap();
        assert_eq!(fund.get_strategy(&s).unwrap().weightage_bps, 6_000);
    }

    #[test]
    fn update_fee_on_inactive_strategy_fails() {
        let mut fund = mock_fund();
        let err = fund
            .update_strategy_performance_fee(&Pubkey::new_unique(), 200)
            .unwrap_err();
        assert_eq!(err, FundError::StrategyNotActive.into());
    }

    #[test]
    fn deposit_guards() {
        let mut fund = mock_fund();
        fund.deposit_limit_tx_min = 10;
        fund.deposit_limit_tx_max = 1_000;
        fund.deposit_limit = 5_000;

        assert!(fund.check_deposit(9, 0).is_err());
        assert!(fund.check_deposit(1_001, 0).is_err());
        assert!(fund.check_deposit(500, 4_600).is_err());
        fund.check_deposit(500, 4_500).unwrap();

        fund.deposits_paused = true;
        let err = fund.check_deposit(500, 0).unwrap_err();
        assert_eq!(err, FundError::DepositsPaused.into());
    }

    #[test]
    fn two_step_governance_transfer() {
        let mut fund = mock_fund();
        let old = fund.governance;
        let candidate = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();

        // only governance can nominate
        assert!(fund.update_governance(&stranger, candidate).is_err());
        fund.update_governance(&old, candidate).unwrap();

        // only the candidate can accept
        assert!(fund.accept_governance(&stranger).is_err());
        assert_eq!(fund.governance, old);

        fund.accept_governance(&candidate).unwrap();
        assert_eq!(fund.governance, candidate);
        assert_eq!(fund.pending_governance, Pubkey::default());
    }

    #[test]
    fn reentrancy_guard_blocks_nested_entry() {
        let mut fund = mock_fund();
        fund.enter_guard().unwrap();
        assert!(fund.enter_guard().is_err());
        fund.exit_guard();
        fund.enter_guard().unwrap();
    }
}
