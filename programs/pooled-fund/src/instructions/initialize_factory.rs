use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

/// Initialize the fund factory
///
/// The deployer becomes factory governance and can later hand it over
/// with the two-step transfer.
#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    #[account(mut)]
    pub governance: Signer<'info>,

    #[account(
        init,
        payer = governance,
        space = FundFactory::SPACE,
        seeds = [FACTORY_SEED],
        bump
    )]
    pub factory: Account<'info, FundFactory>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeFactory>) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.governance = ctx.accounts.governance.key();
    factory.pending_governance = Pubkey::default();
    factory.fund_count = 0;
    factory.bump = ctx.bumps.factory;
    Ok(())
}
