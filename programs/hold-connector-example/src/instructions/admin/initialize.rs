use crate::constants::*;
use crate::state::common_connector_state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use shared_lib::CONNECTOR_AUTH_SEED;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    // Create a new CommonConnectorState
    #[account(init, payer = admin, space = 8 + CommonConnectorState::INIT_SPACE)]
    pub connector_state: Account<'info, CommonConnectorState>,

    #[account()]
    pub underlying_mint: Account<'info, Mint>,

    /// CHECK: Auth PDA
    #[account(
        seeds = [
            CONNECTOR_AUTH_SEED,
            &connector_state.key().to_bytes()
        ],
        bump
    )]
    pub connector_authority: UncheckedAccount<'info>,

    /// create an ATA for the connector to hold underlying, auth is connector_authority
    #[account(init, payer = admin,
        associated_token::mint = underlying_mint,
        associated_token::authority = connector_authority
    )]
    pub connector_deposit_account: Account<'info, TokenAccount>,

    /// where redeems and claims are delivered: the router's reserve account
    #[account(token::mint = underlying_mint)]
    pub reserve_account: Account<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_initialize(ctx: Context<Initialize>) -> Result<()> {
    ctx.accounts.connector_state.set_inner(CommonConnectorState {
        underlying_mint: ctx.accounts.underlying_mint.key(),
        connector_total_underlying: 0,
        claimable_rewards: 0,
        assets_per_share_p32: ONE_ASSET_PER_SHARE_P32,
        reserve_account: ctx.accounts.reserve_account.key(),
    });
    Ok(())
}
