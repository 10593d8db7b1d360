use anchor_lang::prelude::*;

use crate::errors::FundError;

/// Deploys (proxy, fund state, custody) triples under governance
/// control
///
/// Shares the two-step governance primitive with the funds it creates.
#[account]
pub struct FundFactory {
    pub governance: Pubkey,
    pub pending_governance: Pubkey,

    /// Number of funds created, also the next proxy seed index
    pub fund_count: u64,

    pub bump: u8,
}

impl FundFactory {
    /// 8 (discriminator) + 32 + 32 governance pair + 8 count + 1 bump
    /// + 64 padding
    pub const SPACE: usize = 8 + 32 + 32 + 8 + 1 + 64;

    pub fn require_governance(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.governance, FundError::NotGovernance);
        Ok(())
    }

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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_governance_is_two_step() {
        let governance = Pubkey::new_unique();
        let candidate = Pubkey::new_unique();
        let mut factory = FundFactory {
            governance,
            pending_governance: Pubkey::default(),
            fund_count: 0,
            bump: 255,
        };

        assert!(factory.update_governance(&candidate, candidate).is_err());
        factory.update_governance(&governance, candidate).unwrap();
        assert!(factory.accept_governance(&governance).is_err());
        factory.accept_governance(&candidate).unwrap();
        assert_eq!(factory.governance, candidate);
    }
}
