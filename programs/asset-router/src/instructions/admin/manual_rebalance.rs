use crate::instructions::cranks::connector_ops::{
    cpi_redeem, transfer_to_connector, ConnectorAccounts,
};
use crate::util::now_ts;
use crate::{constants::*, error::ErrorCode, RouterState};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
/// owner override: move funds between the reserve and one connector,
/// bypassing the automatic diff computation (intervals and ratio bounds
/// do not apply; the stake/redeem timestamp still advances)
pub struct ManualRebalance<'info> {
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

fn connector_infos<'info>(
    ctx: &Context<'_, '_, '_, 'info, ManualRebalance<'info>>,
) -> [AccountInfo<'info>; 4] {
    [
        ctx.accounts.connector_program.to_account_info(),
        ctx.accounts.connector_state.to_account_info(),
        ctx.accounts.connector_authority.to_account_info(),
        ctx.accounts.connector_deposit_account.to_account_info(),
    ]
}

pub fn handle_manual_stake<'info>(
    ctx: Context<'_, '_, 'info, 'info, ManualRebalance<'info>>,
    index: u8,
    amount: u64,
) -> Result<()> {
    ctx.accounts.router_state.check_not_migrated()?;
    require_gt!(amount, 0, ErrorCode::AmountIsZero);
    require_gte!(
        ctx.accounts.router_state.reserve_amount,
        amount,
        ErrorCode::NotEnoughTokensInReserve
    );

    let entry = ctx.accounts.router_state.connector_entry(index as usize)?.clone();
    let infos = connector_infos(&ctx);
    let connector =
        ConnectorAccounts::checked(&entry, &ctx.accounts.router_state.underlying_mint, &infos)?;
    transfer_to_connector(
        &ctx.accounts.router_state.key(),
        &ctx.accounts.reserve_account.to_account_info(),
        &ctx.accounts.reserve_authority.to_account_info(),
        ctx.bumps.reserve_authority,
        &ctx.accounts.token_program.to_account_info(),
        &connector,
        amount,
    )?;
    let now = now_ts();
    ctx.accounts.router_state.apply_stake(index as usize, amount, now);

    emit!(crate::events::StakeToConnectorEvent {
        router_state: ctx.accounts.router_state.key(),
        connector_state: ctx.accounts.connector_state.key(),
        amount,
        forced: false,
    });
    Ok(())
}

pub fn handle_manual_redeem<'info>(
    ctx: Context<'_, '_, 'info, 'info, ManualRebalance<'info>>,
    index: u8,
    amount: u64,
) -> Result<()> {
    ctx.accounts.router_state.check_not_migrated()?;
    require_gt!(amount, 0, ErrorCode::AmountIsZero);

    let entry = ctx.accounts.router_state.connector_entry(index as usize)?.clone();
    let infos = connector_infos(&ctx);
    let connector =
        ConnectorAccounts::checked(&entry, &ctx.accounts.router_state.underlying_mint, &infos)?;
    // refresh the report first: a redeem may reveal profit or slashing
    let report = connector.read_state()?;
    let now = now_ts();
    ctx.accounts.router_state.recognize_connector_report(
        index as usize,
        report.connector_total_underlying,
        now,
    );
    require_gte!(
        ctx.accounts.router_state.connectors[index as usize].last_read_underlying,
        amount,
        ErrorCode::InsufficientExternalLiquidity
    );

    cpi_redeem(
        &connector,
        &ctx.accounts.reserve_account.to_account_info(),
        &ctx.accounts.token_program.to_account_info(),
        amount,
    )?;
    ctx.accounts.router_state.apply_redeem(index as usize, amount, now);

    emit!(crate::events::RedeemFromConnectorEvent {
        router_state: ctx.accounts.router_state.key(),
        connector_state: ctx.accounts.connector_state.key(),
        amount,
        forced: false,
    });
    Ok(())
}
