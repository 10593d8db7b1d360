use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

/// Two-step governance transfer on a fund
///
/// `update_governance` nominates (no event); only the nominated
/// candidate can `accept_governance`, which emits exactly one
/// `GovernanceUpdated`.
#[derive(Accounts)]
pub struct FundGovernance<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [FUND_SEED, fund_state.proxy.as_ref()],
        bump = fund_state.bump,
    )]
    pub fund_state: Account<'info, FundState>,
}

pub fn update_governance(ctx: Context<FundGovernance>, candidate: Pubkey) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.update_governance(&ctx.accounts.caller.key(), candidate)
}

pub fn accept_governance(ctx: Context<FundGovernance>) -> Result<()> {
    let fund = &mut ctx.accounts.fund_state;
    fund.accept_governance(&ctx.accounts.caller.key())?;

    emit!(GovernanceUpdated {
        governance: fund.governance,
    });

    Ok(())
}

/// Same primitive on the factory
#[derive(Accounts)]
pub struct FactoryGovernance<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, FundFactory>,
}

pub fn factory_update_governance(ctx: Context<FactoryGovernance>, candidate: Pubkey) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.update_governance(&ctx.accounts.caller.key(), candidate)
}

pub fn factory_accept_governance(ctx: Context<FactoryGovernance>) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.accept_governance(&ctx.accounts.caller.key())?;

    emit!(GovernanceUpdated {
        governance: factory.governance,
    });

    Ok(())
}
