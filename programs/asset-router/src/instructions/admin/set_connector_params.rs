use crate::{constants::MAX_PACKED_PARAMS_LEN, error::ErrorCode, RouterState};
use anchor_lang::prelude::*;
use shared_lib::{ClaimParams, EmergencyParams, StakeParams};

#[derive(Accounts)]
pub struct SetConnectorParams<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,
}

/// the blobs stay opaque to the router core; setters only prove they decode
fn check_packed<T>(
    bytes: &[u8],
    unpack_or_default: impl Fn(&[u8]) -> Option<T>,
) -> Result<()> {
    require_gte!(
        MAX_PACKED_PARAMS_LEN as usize,
        bytes.len(),
        ErrorCode::MalformedPackedParams
    );
    unpack_or_default(bytes).ok_or(error!(ErrorCode::MalformedPackedParams))?;
    Ok(())
}

pub fn handle_set_stake_params(
    ctx: Context<SetConnectorParams>,
    index: u8,
    params: Vec<u8>,
) -> Result<()> {
    check_packed(&params, |b| StakeParams::unpack_or_default(b))?;
    let state = &mut ctx.accounts.router_state;
    state.connector_entry(index as usize)?;
    state.connectors[index as usize].stake_params = params;
    Ok(())
}

pub fn handle_set_claim_params(
    ctx: Context<SetConnectorParams>,
    index: u8,
    params: Vec<u8>,
) -> Result<()> {
    check_packed(&params, |b| ClaimParams::unpack_or_default(b))?;
    let state = &mut ctx.accounts.router_state;
    state.connector_entry(index as usize)?;
    state.connectors[index as usize].claim_params = params;
    Ok(())
}

pub fn handle_set_emergency_params(
    ctx: Context<SetConnectorParams>,
    index: u8,
    params: Vec<u8>,
) -> Result<()> {
    check_packed(&params, |b| EmergencyParams::unpack_or_default(b))?;
    let state = &mut ctx.accounts.router_state;
    state.connector_entry(index as usize)?;
    state.connectors[index as usize].emergency_params = params;
    Ok(())
}
