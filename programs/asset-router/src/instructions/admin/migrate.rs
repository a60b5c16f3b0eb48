use crate::{constants::*, RouterState};
use anchor_lang::prelude::*;
use anchor_spl::token::{
    set_authority, spl_token::instruction::AuthorityType, Mint, SetAuthority, Token, TokenAccount,
    Transfer,
};

#[derive(Accounts)]
/// hand the custody over to a successor manager: the wrapper mint authority
/// moves to the successor and the reserve is emptied into the successor's
/// reserve account. Deposits, withdrawals and pokes reject afterwards;
/// in-flight connector state travels via the forwarded payload
pub struct MigrateToNewManager<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,

    #[account(address = router_state.underlying_mint)]
    pub underlying_mint: Box<Account<'info, Mint>>,

    #[account(mut, address = router_state.wrapper_mint)]
    pub wrapper_mint: Box<Account<'info, Mint>>,
    /// CHECK: Auth PDA
    #[account(
        seeds = [
            &router_state.key().to_bytes(),
            WRAPPER_MINT_AUTH_SEED
        ],
        bump
    )]
    pub wrapper_mint_authority: UncheckedAccount<'info>,

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

    /// CHECK: the successor manager (program state or authority), only recorded
    pub new_manager: UncheckedAccount<'info>,
    /// the successor's reserve, receives the full liquid buffer
    #[account(mut, token::mint = underlying_mint)]
    pub new_manager_reserve_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_migrate_to_new_manager(
    ctx: Context<MigrateToNewManager>,
    payload: Vec<u8>,
) -> Result<()> {
    ctx.accounts.router_state.check_not_migrated()?;

    // wrapper mint authority goes to the successor
    set_authority(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            SetAuthority {
                account_or_mint: ctx.accounts.wrapper_mint.to_account_info(),
                current_authority: ctx.accounts.wrapper_mint_authority.to_account_info(),
            },
            &[&[
                &ctx.accounts.router_state.key().to_bytes(),
                WRAPPER_MINT_AUTH_SEED,
                &[ctx.bumps.wrapper_mint_authority],
            ]],
        ),
        AuthorityType::MintTokens,
        Some(ctx.accounts.new_manager.key()),
    )?;

    // the whole liquid buffer moves over
    let reserve_moved = ctx.accounts.router_state.reserve_amount;
    if reserve_moved > 0 {
        anchor_spl::token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.reserve_account.to_account_info(),
                    to: ctx.accounts.new_manager_reserve_account.to_account_info(),
                    authority: ctx.accounts.reserve_authority.to_account_info(),
                },
                &[&[
                    &ctx.accounts.router_state.key().to_bytes(),
                    RESERVE_AUTH_SEED,
                    &[ctx.bumps.reserve_authority],
                ]],
            ),
            reserve_moved,
        )?;
        ctx.accounts.router_state.note_withdraw(reserve_moved);
    }

    ctx.accounts.router_state.migrated_to = ctx.accounts.new_manager.key();

    let event = crate::events::RouterMigratedEvent {
        router_state: ctx.accounts.router_state.key(),
        new_manager: ctx.accounts.new_manager.key(),
        reserve_moved,
        payload,
    };
    emit!(event);
    msg!("{:?}", event);
    Ok(())
}
