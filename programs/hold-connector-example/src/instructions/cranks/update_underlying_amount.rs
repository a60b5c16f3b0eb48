use crate::common_connector_state::CommonConnectorState;
use anchor_lang::prelude::*;
use shared_lib::CONNECTOR_AUTH_SEED;

use anchor_spl::token::TokenAccount;

#[derive(Accounts)]
// permissionless
pub struct UpdateUnderlyingAmount<'info> {
    #[account(mut, has_one = underlying_mint)]
    pub connector_state: Account<'info, CommonConnectorState>,

    /// CHECK: no need to decode mint
    #[account()]
    pub underlying_mint: UncheckedAccount<'info>,

    /// CHECK: Auth PDA
    #[account(
        seeds = [
            CONNECTOR_AUTH_SEED,
            &connector_state.key().to_bytes()
        ],
        bump
    )]
    pub connector_authority: UncheckedAccount<'info>,

    /// the connector's underlying ATA
    #[account(
        associated_token::mint = underlying_mint,
        associated_token::authority = connector_authority
    )]
    pub connector_deposit_account: Account<'info, TokenAccount>,
}

pub fn handle_update_underlying_amount(ctx: Context<UpdateUnderlyingAmount>) -> Result<()> {
    // the router stakes by plain transfer into our ATA, and a nice soul
    // might donate; both show up here as balance above the recognized total
    // Phase 1. Collect values
    let actual_underlying = ctx.accounts.connector_deposit_account.amount;
    let old_underlying = ctx.accounts.connector_state.connector_total_underlying;
    let (profit, slashing) = {
        // Phase 2. ?
        if actual_underlying >= old_underlying {
            // Phase 3. Profit!
            (actual_underlying - old_underlying, 0)
        } else {
            // slashed? :(
            (0, old_underlying - actual_underlying)
        }
    };

    // update connector_total_underlying to the physical balance
    ctx.accounts.connector_state.connector_total_underlying = actual_underlying;

    emit!(crate::events::UpdateUnderlyingAmountEvent {
        connector_state: ctx.accounts.connector_state.key(),
        underlying_mint: ctx.accounts.underlying_mint.key(),
        old_underlying,
        profit,
        slashing,
    });

    Ok(())
}
