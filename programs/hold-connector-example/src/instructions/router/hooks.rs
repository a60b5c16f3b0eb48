use crate::common_connector_state::CommonConnectorState;
use anchor_lang::prelude::*;

#[derive(Accounts)]
/// connector interface: optional hooks the router CPIs around a poke when
/// the registry entry asks for them. A just-hold connector has nothing to
/// prepare or settle
pub struct PokeHook<'info> {
    #[account()]
    pub connector_state: Account<'info, CommonConnectorState>,
}

pub fn handle_before_poke(ctx: Context<PokeHook>) -> Result<()> {
    msg!("before_poke {}", ctx.accounts.connector_state.key());
    Ok(())
}

pub fn handle_after_poke(ctx: Context<PokeHook>) -> Result<()> {
    msg!("after_poke {}", ctx.accounts.connector_state.key());
    Ok(())
}
