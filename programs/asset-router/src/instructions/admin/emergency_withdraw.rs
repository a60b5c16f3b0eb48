use crate::instructions::cranks::connector_ops::{cpi_redeem, ConnectorAccounts};
use crate::state::check_emergency;
use crate::util::now_ts;
use crate::{constants::*, error::ErrorCode, RouterState};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use shared_lib::EmergencyParams;

#[derive(Accounts)]
/// alternate withdrawal path for a connector whose external share price fell
/// below the configured safety trigger; bypasses interval and ratio gating.
/// Refuses while the connector is healthy, and refuses again if even the
/// emergency execution would happen below the absolute floor price
pub struct EmergencyWithdraw<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,

    #[account(address = router_state.underlying_mint)]
    pub underlying_mint: Box<Account<'info, Mint>>,

    /// CHECK: Auth PDA
    #[account(
        seeds = [
            &router_state.key().to_bytes(),
            RESERVE_AUTH_SEED
        ],
        bump
    )]
    pub reserve_authority: UncheckedAccount<'info>,
    #[account(mut, associated_token::mint = underlying_mint, associated_token::authority = reserve_authority)]
    pub reserve_account: Account<'info, TokenAccount>,

    /// CHECK: connector program code
    #[account()]
    pub connector_program: UncheckedAccount<'info>,
    /// must be the one listed at the given registry index
    /// CHECK: external acc manually deserialized
    #[account()]
    pub connector_state: UncheckedAccount<'info>,
    /// CHECK: connector auth PDA, verified against the registry entry
    #[account()]
    pub connector_authority: UncheckedAccount<'info>,
    #[account(mut)]
    pub connector_deposit_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_emergency_withdraw(ctx: Context<EmergencyWithdraw>, index: u8) -> Result<()> {
    let entry = ctx.accounts.router_state.connector_entry(index as usize)?.clone();
    let params = EmergencyParams::unpack(&entry.emergency_params)
        .ok_or(error!(ErrorCode::MalformedPackedParams))?;

    let infos = [
        ctx.accounts.connector_program.to_account_info(),
        ctx.accounts.connector_state.to_account_info(),
        ctx.accounts.connector_authority.to_account_info(),
        ctx.accounts.connector_deposit_account.to_account_info(),
    ];
    let connector =
        ConnectorAccounts::checked(&entry, &ctx.accounts.router_state.underlying_mint, &infos)?;

    // the gate reads the external price fresh; both refusals are deliberate
    let report = connector.read_state()?;
    check_emergency(&params, report.assets_per_share_p32)?;

    let now = now_ts();
    ctx.accounts.router_state.recognize_connector_report(
        index as usize,
        report.connector_total_underlying,
        now,
    );
    let amount =
        params.redeem_amount.min(ctx.accounts.router_state.connectors[index as usize].last_read_underlying);
    require_gt!(amount, 0, ErrorCode::AmountIsZero);

    cpi_redeem(
        &connector,
        &ctx.accounts.reserve_account.to_account_info(),
        &ctx.accounts.token_program.to_account_info(),
        amount,
    )?;
    ctx.accounts.router_state.apply_redeem(index as usize, amount, now);

    emit!(crate::events::EmergencyWithdrawEvent {
        router_state: ctx.accounts.router_state.key(),
        connector_state: ctx.accounts.connector_state.key(),
        amount,
        assets_per_share_p32: report.assets_per_share_p32,
    });
    Ok(())
}
