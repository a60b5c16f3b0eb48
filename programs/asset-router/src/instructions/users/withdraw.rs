use crate::instructions::cranks::connector_ops::{cpi_redeem, parse_connector_groups};
use crate::util::now_ts;
use crate::{constants::*, error::ErrorCode, RouterState};
/// Withdraw underlying by burning wrapper at the current ratio
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{burn, Burn, Mint, Token, TokenAccount, Transfer};

#[derive(Accounts)]
/// Burn wrapper and get the matching share of the available underlying total.
/// If the reserve cannot cover the withdrawal, the caller may supply the
/// connector account groups so the shortfall is redeemed first, in list order
pub struct Withdraw<'info> {
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
            RESERVE_AUTH_SEED
        ],
        bump
    )]
    pub reserve_authority: UncheckedAccount<'info>,
    #[account(mut, associated_token::mint = underlying_mint, associated_token::authority = reserve_authority)]
    pub reserve_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub withdrawer: Signer<'info>,
    #[account(mut, token::mint = underlying_mint, token::authority = withdrawer)]
    pub withdrawer_underlying_account: Account<'info, TokenAccount>,
    #[account(mut, token::mint = wrapper_mint, token::authority = withdrawer)]
    pub withdrawer_wrapper_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// amount is a wrapper amount
pub fn handle_withdraw<'info>(
    ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>,
    amount: u64,
    fee_offered_lamports: u64,
) -> Result<()> {
    ctx.accounts.router_state.check_not_migrated()?;

    require_gt!(amount, 0, ErrorCode::ZeroWithdrawAmount);

    // same fixed side-payment as deposits
    let expected_fee = if ctx.accounts.router_state.is_fee_waived(&ctx.accounts.withdrawer.key()) {
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
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.withdrawer.to_account_info(),
                    to: ctx.accounts.router_state.to_account_info(),
                },
            ),
            expected_fee,
        )?;
    }

    let now = now_ts();

    // pre-withdraw hook: with connector groups supplied, refresh every
    // connector's report before pricing, then cover any reserve shortfall
    let groups = if ctx.remaining_accounts.is_empty() {
        vec![]
    } else {
        let groups = parse_connector_groups(&ctx.accounts.router_state, ctx.remaining_accounts)?;
        for (index, connector) in groups.iter().enumerate() {
            let reported = connector.read_state()?.connector_total_underlying;
            ctx.accounts.router_state.recognize_connector_report(index, reported, now);
        }
        groups
    };

    let underlying_returned = ctx.accounts.router_state.underlying_for_wrapper(
        amount,
        ctx.accounts.wrapper_mint.supply,
        now,
    );

    let mut redeemed_from_connectors = 0u64;
    for (index, connector) in groups.iter().enumerate() {
        if ctx.accounts.router_state.reserve_amount >= underlying_returned {
            break;
        }
        let shortfall = underlying_returned - ctx.accounts.router_state.reserve_amount;
        let take = shortfall.min(ctx.accounts.router_state.connectors[index].last_read_underlying);
        if take == 0 {
            continue;
        }
        // exact-amount redeem; the connector fails the whole withdraw if it
        // cannot deliver (insufficient external liquidity)
        cpi_redeem(
            connector,
            &ctx.accounts.reserve_account.to_account_info(),
            &ctx.accounts.token_program.to_account_info(),
            take,
        )?;
        ctx.accounts.router_state.apply_redeem(index, take, now);
        redeemed_from_connectors += take;
    }

    require_gte!(
        ctx.accounts.router_state.reserve_amount,
        underlying_returned,
        ErrorCode::NotEnoughTokensInReserve
    );

    // -------
    // burn the wrapper and keep contract internal accounting
    // -------
    burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.wrapper_mint.to_account_info(),
                from: ctx.accounts.withdrawer_wrapper_account.to_account_info(),
                authority: ctx.accounts.withdrawer.to_account_info(),
            },
        ),
        amount,
    )?;

    // send underlying to the withdrawer
    {
        let transfer_instruction = Transfer {
            from: ctx.accounts.reserve_account.to_account_info(),
            to: ctx.accounts.withdrawer_underlying_account.to_account_info(),
            authority: ctx.accounts.reserve_authority.to_account_info(),
        };
        let router_state_bytes = ctx.accounts.router_state.key().to_bytes();
        let reserve_authority_bump = [ctx.bumps.reserve_authority];
        let signer_seeds: &[&[&[u8]]] = &[&[
            &router_state_bytes,
            RESERVE_AUTH_SEED,
            &reserve_authority_bump,
        ]];
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_instruction,
            signer_seeds,
        );
        anchor_spl::token::transfer(cpi_ctx, underlying_returned)?;
    }
    ctx.accounts.router_state.note_withdraw(underlying_returned);

    // tracked reserve must never exceed what the account physically holds
    ctx.accounts.reserve_account.reload()?;
    require_gte!(
        ctx.accounts.reserve_account.amount,
        ctx.accounts.router_state.reserve_amount,
        ErrorCode::ReserveAccountingMismatch
    );

    let event = crate::events::WithdrawEvent {
        router_state: ctx.accounts.router_state.key(),
        withdrawer: ctx.accounts.withdrawer.key(),
        wrapper_burned: amount,
        underlying_returned,
        redeemed_from_connectors,
        //--- wrapper price components after the withdraw
        reserve_amount: ctx.accounts.router_state.reserve_amount,
        total_staked_amount: ctx.accounts.router_state.total_staked_amount,
        wrapper_supply: ctx.accounts.wrapper_mint.supply - amount,
    };
    emit!(event);
    msg!("{:?}", event);
    Ok(())
}
