use crate::common_connector_state::CommonConnectorState;
use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount, Transfer};
use shared_lib::CONNECTOR_AUTH_SEED;

#[derive(Accounts)]
/// connector interface: move exactly `amount` underlying back to the
/// router's reserve, or fail. Account order is fixed by the interface:
/// [connector_state, connector_authority, connector_deposit_account,
///  reserve_account, token_program]
pub struct Redeem<'info> {
    #[account(mut, has_one = reserve_account)]
    pub connector_state: Account<'info, CommonConnectorState>,

    /// CHECK: Auth PDA
    #[account(
        seeds = [
            CONNECTOR_AUTH_SEED,
            &connector_state.key().to_bytes()
        ],
        bump
    )]
    pub connector_authority: UncheckedAccount<'info>,

    #[account(mut,
        associated_token::mint = connector_state.underlying_mint,
        associated_token::authority = connector_authority
    )]
    pub connector_deposit_account: Account<'info, TokenAccount>,

    /// the fixed destination configured at initialize
    #[account(mut)]
    pub reserve_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_redeem(ctx: Context<Redeem>, amount: u64) -> Result<()> {
    require_gt!(amount, 0, ErrorCode::AmountIsZero);
    // an exact-amount operation: no partial fills
    require_gte!(
        ctx.accounts.connector_state.connector_total_underlying,
        amount,
        ErrorCode::InsufficientConnectorLiquidity
    );
    require_gte!(
        ctx.accounts.connector_deposit_account.amount,
        amount,
        ErrorCode::InsufficientConnectorLiquidity
    );

    anchor_spl::token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.connector_deposit_account.to_account_info(),
                to: ctx.accounts.reserve_account.to_account_info(),
                authority: ctx.accounts.connector_authority.to_account_info(),
            },
            &[&[
                CONNECTOR_AUTH_SEED,
                &ctx.accounts.connector_state.key().to_bytes(),
                &[ctx.bumps.connector_authority],
            ]],
        ),
        amount,
    )?;

    ctx.accounts.connector_state.connector_total_underlying -= amount;

    emit!(crate::events::ConnectorRedeemEvent {
        connector_state: ctx.accounts.connector_state.key(),
        amount,
    });
    Ok(())
}
