use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, state::*};

/// Swap the proxy's implementation pointer
///
/// The fund state the proxy fronts is never touched; only the routing
/// changes. The finalize hook (governance gate plus manifest
/// validation) can veto the swap, in which case the pointer stays on
/// the old implementation.
#[derive(Accounts)]
pub struct Upgrade<'info> {
    pub caller: Signer<'info>,

    #[account(mut)]
    pub fund_proxy: Account<'info, FundProxy>,

    #[account(
        mut,
        seeds = [FUND_SEED, fund_proxy.key().as_ref()],
        bump = fund_state.bump,
        constraint = fund_proxy.fund == fund_state.key() @ FundError::UpgradeFailed,
    )]
    pub fund_state: Account<'info, FundState>,

    /// CHECK: candidate manifest, validated by the finalize hook below
    pub new_implementation: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<Upgrade>) -> Result<()> {
    ctx.accounts.fund_state.enter_guard()?;
    let proxy = &mut ctx.accounts.fund_proxy;

    // finalize hook: any failure here aborts the swap entirely
    require_keys_eq!(
        ctx.accounts.caller.key(),
        ctx.accounts.fund_state.governance,
        FundError::UpgradeFailed
    );
    let manifest_data = ctx.accounts.new_implementation.try_borrow_data()?;
    let mut manifest_slice: &[u8] = &manifest_data;
    let manifest = FundImplementation::try_deserialize(&mut manifest_slice)
        .map_err(|_| error!(FundError::UpgradeFailed))?;
    proxy.validate_upgrade(&manifest)?;

    proxy.implementation = ctx.accounts.new_implementation.key();
    proxy.state_version = manifest.state_version;

    msg!(
        "fund {} upgraded to implementation {} (logic v{}, state v{})",
        proxy.fund,
        proxy.implementation,
        manifest.logic_version,
        manifest.state_version,
    );

    ctx.accounts.fund_state.exit_guard();
    Ok(())
}
