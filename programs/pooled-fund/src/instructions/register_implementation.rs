use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

/// Publish a fund logic manifest
///
/// The manifest is what the factory's capability check and the proxy's
/// upgrade hook inspect; publishing is permissionless, deploying and
/// upgrading are not.
#[derive(Accounts)]
#[instruction(logic_version: u16)]
pub struct RegisterImplementation<'info> {
    #[account(mut)]
    pub publisher: Signer<'info>,

    #[account(
        init,
        payer = publisher,
        space = FundImplementation::SPACE,
        seeds = [
            IMPLEMENTATION_SEED,
            publisher.key().as_ref(),
            &logic_version.to_le_bytes(),
        ],
        bump
    )]
    pub implementation: Account<'info, FundImplementation>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<RegisterImplementation>,
    logic_version: u16,
    state_version: u16,
) -> Result<()> {
    let implementation = &mut ctx.accounts.implementation;
    implementation.publisher = ctx.accounts.publisher.key();
    implementation.capability = FUND_CAPABILITY;
    implementation.state_version = state_version;
    implementation.logic_version = logic_version;
    implementation.bump = ctx.bumps.implementation;
    Ok(())
}
