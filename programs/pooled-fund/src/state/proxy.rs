use anchor_lang::prelude::*;

use crate::constants::FUND_CAPABILITY;
use crate::errors::FundError;

/// Upgrade proxy fronting one fund
///
/// Holds nothing but the routing indirection: which logic manifest is
/// live for the fund state it fronts. Swapping `implementation` never
/// touches the fund state; balances, registry and fee settings survive
/// every upgrade.
#[account]
pub struct FundProxy {
    /// Fund state this proxy routes to
    pub fund: Pubkey,

    /// Currently active implementation manifest
    pub implementation: Pubkey,

    /// State layout version of the live implementation; candidates may
    /// never regress below it
    pub state_version: u16,

    pub bump: u8,
}

impl FundProxy {
    /// 8 (discriminator) + 32 fund + 32 implementation + 2 state version
    /// + 1 bump + 64 padding
    pub const SPACE: usize = 8 + 32 + 32 + 2 + 1 + 64;

    /// Post-swap validation hook: the candidate must advertise the fund
    /// capability and must not regress the persisted state layout. Any
    /// failure here vetoes the whole upgrade.
    pub fn validate_upgrade(&self, candidate: &FundImplementation) -> Result<()> {
        require!(
            candidate.capability == FUND_CAPABILITY,
            FundError::UpgradeFailed
        );
        require!(candidate.state_version >= 1, FundError::UpgradeFailed);
        require!(
            candidate.state_version >= self.state_version,
            FundError::UpgradeFailed
        );
        Ok(())
    }
}

/// Self-describing manifest for one version of the fund logic
///
/// The factory refuses to deploy, and the proxy refuses to upgrade to,
/// anything that does not expose the expected capability set.
#[account]
pub struct FundImplementation {
    /// Account that registered this manifest
    pub publisher: Pubkey,

    /// Capability tag, must equal [`FUND_CAPABILITY`]
    pub capability: [u8; 8],

    /// Layout version of the fund state this logic understands
    pub state_version: u16,

    /// Monotonic logic version, informational
    pub logic_version: u16,

    pub bump: u8,
}

impl FundImplementation {
    /// 8 (discriminator) + 32 publisher + 8 capability + 2 + 2 versions
    /// + 1 bump + 32 padding
    pub const SPACE: usize = 8 + 32 + 8 + 2 + 2 + 1 + 32;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy() -> FundProxy {
        FundProxy {
            fund: Pubkey::new_unique(),
            implementation: Pubkey::new_unique(),
            state_version: 1,
            bump: 255,
        }
    }

    fn manifest() -> FundImplementation {
        FundImplementation {
            publisher: Pubkey::new_unique(),
            capability: FUND_CAPABILITY,
            state_version: 1,
            logic_version: 2,
            bump: 255,
        }
    }

    #[test]
    fn valid_manifest_passes_the_hook() {
        assert!(proxy().validate_upgrade(&manifest()).is_ok());
    }

    #[test]
    fn wrong_capability_vetoes_the_swap() {
        let mut bad = manifest();
        bad.capability = *b"OTHER___";
        let err = proxy().validate_upgrade(&bad).unwrap_err();
        assert_eq!(err, FundError::UpgradeFailed.into());
    }

    #[test]
    fn zero_state_version_vetoes_the_swap() {
        let mut bad = manifest();
        bad.state_version = 0;
        assert!(proxy().validate_upgrade(&bad).is_err());
    }

    #[test]
    fn state_version_downgrade_vetoes_the_swap() {
        let mut live = proxy();
        live.state_version = 2;
        // manifest() carries state_version 1
        let err = live.validate_upgrade(&manifest()).unwrap_err();
        assert_eq!(err, FundError::UpgradeFailed.into());

        let mut same = manifest();
        same.state_version = 2;
        live.validate_upgrade(&same).unwrap();
    }
}
