use crate::instructions::cranks::connector_ops::invoke_as_reserve_authority;
use crate::{constants::*, error::ErrorCode, RouterState};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct RelayCall {
    /// how many of the remaining accounts (after the target program) this call consumes
    pub accounts_len: u8,
    pub data: Vec<u8>,
}

#[derive(Accounts)]
/// owner relay: execute an arbitrary instruction under the custody identity
/// (the reserve authority PDA signs), so the router can grant allowances or
/// talk to external protocols directly. A failing callee aborts the relay
/// with its own error
pub struct CallExternal<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(has_one = admin)]
    pub router_state: Account<'info, RouterState>,

    /// CHECK: Auth PDA, the custody identity the callee sees
    #[account(
        seeds = [
            &router_state.key().to_bytes(),
            RESERVE_AUTH_SEED
        ],
        bump
    )]
    pub reserve_authority: UncheckedAccount<'info>,
    // remaining_accounts: [target_program, callee accounts...]
}

pub fn handle_call_external<'info>(
    ctx: Context<'_, '_, 'info, 'info, CallExternal<'info>>,
    data: Vec<u8>,
) -> Result<()> {
    let [target_program, callee_accounts @ ..] = ctx.remaining_accounts else {
        return err!(ErrorCode::WrongConnectorAccountsLen);
    };
    relay(&ctx, target_program, callee_accounts, data)
}

/// several relayed instructions in one transaction; each call names how many
/// of the remaining accounts it consumes, after its leading target program
pub fn handle_call_external_batch<'info>(
    ctx: Context<'_, '_, 'info, 'info, CallExternal<'info>>,
    calls: Vec<RelayCall>,
) -> Result<()> {
    let mut cursor = ctx.remaining_accounts;
    for call in calls {
        let needed = 1 + call.accounts_len as usize;
        require_gte!(cursor.len(), needed, ErrorCode::WrongConnectorAccountsLen);
        let (group, rest) = cursor.split_at(needed);
        relay(&ctx, &group[0], &group[1..], call.data)?;
        cursor = rest;
    }
    Ok(())
}

fn relay<'info>(
    ctx: &Context<'_, '_, 'info, 'info, CallExternal<'info>>,
    target_program: &AccountInfo<'info>,
    callee_accounts: &[AccountInfo<'info>],
    data: Vec<u8>,
) -> Result<()> {
    let data_len = data.len() as u32;
    invoke_as_reserve_authority(
        &ctx.accounts.router_state.key(),
        &ctx.accounts.reserve_authority.key(),
        ctx.bumps.reserve_authority,
        target_program,
        callee_accounts,
        data,
    )?;
    emit!(crate::events::CallExternalEvent {
        router_state: ctx.accounts.router_state.key(),
        target_program: target_program.key(),
        data_len,
    });
    Ok(())
}
