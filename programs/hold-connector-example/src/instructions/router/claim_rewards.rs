use crate::common_connector_state::CommonConnectorState;
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount, Transfer};
use shared_lib::CONNECTOR_AUTH_SEED;

#[derive(Accounts)]
/// connector interface: harvest outstanding rewards to the reserve and
/// return the amount. Same fixed account order as redeem
pub struct ClaimRewards<'info> {
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

    #[account(mut)]
    pub reserve_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// a just-hold connector accrues no rewards, so this is the interface's
/// idempotent no-op path: claim nothing, report zero
pub fn handle_claim_rewards(ctx: Context<ClaimRewards>) -> Result<u64> {
    let claimed = ctx.accounts.connector_state.claimable_rewards;
    if claimed == 0 {
        return Ok(0);
    }

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
        claimed,
    )?;
    ctx.accounts.connector_state.claimable_rewards = 0;

    emit!(crate::events::ConnectorClaimEvent {
        connector_state: ctx.accounts.connector_state.key(),
        claimed,
    });
    Ok(claimed)
}
