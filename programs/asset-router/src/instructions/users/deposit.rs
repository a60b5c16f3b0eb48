use crate::util::now_ts;
use crate::{constants::*, error::ErrorCode, RouterState};
/// Deposit underlying, get wrapper minted at the current ratio
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{mint_to, MintTo, TokenAccount, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token},
};

#[derive(Accounts)]
/// Deposit the underlying asset into the reserve
/// get wrapper minted for the deposit's share of the available total
pub struct Deposit<'info> {
    #[account(mut)]
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

    #[account(mut)]
    pub depositor: Signer<'info>,
    #[account(mut, token::mint = underlying_mint, token::authority = depositor)]
    pub depositor_underlying_account: Account<'info, TokenAccount>,
    #[account(mut, token::mint = wrapper_mint, token::authority = depositor)]
    pub depositor_wrapper_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// amount is an underlying amount; fee_offered_lamports must match the
/// configured side-payment (zero for allow-listed depositors)
pub fn handle_deposit(ctx: Context<Deposit>, amount: u64, fee_offered_lamports: u64) -> Result<()> {
    ctx.accounts.router_state.check_not_migrated()?;

    require_gt!(amount, 0, ErrorCode::ZeroDepositAmount);
    // check amount > MIN_MOVEMENT_UNITS
    require_gte!(amount, MIN_MOVEMENT_UNITS, ErrorCode::DepositAmountTooSmall);

    // fixed side-payment fee, unless the depositor is allow-listed
    let expected_fee = if ctx.accounts.router_state.is_fee_waived(&ctx.accounts.depositor.key()) {
        require_eq!(fee_offered_lamports, 0, ErrorCode::FeeNotWaived);
        0
    } else {
        require_eq!(
            fee_offered_lamports,
            ctx.accounts.router_state.deposit_fee_lamports,
            ErrorCode::DepositFeeRequired
        );
        ctx.accounts.router_state.deposit_fee_lamports
    };
    if expected_fee > 0 {
        // fees accumulate on the router-state account until the admin collects them
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.depositor.to_account_info(),
                    to: ctx.accounts.router_state.to_account_info(),
                },
            ),
            expected_fee,
        )?;
    }

    // how much wrapper the deposit is worth, at the current ratio
    // Note: do this computation before altering reserve_amount
    let now = now_ts();
    let wrapper_minted = ctx.accounts.router_state.wrapper_amount_for_deposit(
        amount,
        ctx.accounts.wrapper_mint.supply,
        now,
    );

    // Transfer underlying to the reserve account
    {
        let transfer_instruction = Transfer {
            from: ctx.accounts.depositor_underlying_account.to_account_info(),
            to: ctx.accounts.reserve_account.to_account_info(),
            authority: ctx.accounts.depositor.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            transfer_instruction,
        );
        anchor_spl::token::transfer(cpi_ctx, amount)?;
    }
    // the tokens are added to the tracked reserve
    ctx.accounts.router_state.note_deposit(amount);

    // mint wrapper for the depositor
    mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.wrapper_mint.to_account_info(),
                to: ctx.accounts.depositor_wrapper_account.to_account_info(),
                authority: ctx.accounts.wrapper_mint_authority.to_account_info(),
            },
            &[&[
                &ctx.accounts.router_state.key().to_bytes(),
                WRAPPER_MINT_AUTH_SEED,
                &[ctx.bumps.wrapper_mint_authority],
            ]],
        ),
        wrapper_minted,
    )?;

    let event = crate::events::DepositEvent {
        router_state: ctx.accounts.router_state.key(),
        depositor: ctx.accounts.depositor.key(),
        underlying_amount: amount,
        wrapper_minted,
        deposit_fee_lamports: expected_fee,
        //--- wrapper price components after the deposit
        reserve_amount: ctx.accounts.router_state.reserve_amount,
        total_staked_amount: ctx.accounts.router_state.total_staked_amount,
        wrapper_supply: ctx.accounts.wrapper_mint.supply + wrapper_minted,
    };
    emit!(event);
    msg!("{:?}", event);
    Ok(())
}
