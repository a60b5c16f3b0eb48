use crate::constants::*;
use crate::state::RouterState;
use crate::util::check_reserve_config;
use anchor_lang::prelude::*;

use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(init, payer = admin, space = 8 + RouterState::INIT_SPACE)]
    pub router_state: Account<'info, RouterState>,

    #[account()]
    pub underlying_mint: Box<Account<'info, Mint>>,

    /// CHECK: Auth PDA
    #[account(
        seeds = [
            &router_state.key().to_bytes(),
            WRAPPER_MINT_AUTH_SEED
        ],
        bump
    )]
    pub wrapper_mint_authority: UncheckedAccount<'info>,
    #[account(init,
        payer = admin,
        mint::decimals = underlying_mint.decimals, // wrapper and underlying share one unit scale
        mint::authority = wrapper_mint_authority,
        mint::freeze_authority = wrapper_mint_authority
        )]
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
    /// the liquid buffer every deposit lands in
    #[account(init, payer = admin,
        associated_token::mint = underlying_mint,
        associated_token::authority = reserve_authority
    )]
    pub reserve_account: Box<Account<'info, TokenAccount>>,

    /// performance fees land here
    #[account(token::mint = underlying_mint)]
    pub fee_receiver_account: Account<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn handle_initialize(
    ctx: Context<Initialize>,
    target_reserve_ratio_bp: u16,
    lower_bound_bp: u16,
    upper_bound_bp: u16,
    min_rebalance_interval: u64,
    max_rebalance_interval: u64,
    performance_fee_bp: u16,
) -> Result<()> {
    check_reserve_config(
        target_reserve_ratio_bp,
        lower_bound_bp,
        upper_bound_bp,
        min_rebalance_interval,
        max_rebalance_interval,
    )?;
    require_gte!(
        MAX_PERFORMANCE_FEE_BP,
        performance_fee_bp,
        crate::error::ErrorCode::PerformanceFeeOverLimit
    );

    ctx.accounts.router_state.set_inner(RouterState {
        admin: ctx.accounts.admin.key(),
        underlying_mint: ctx.accounts.underlying_mint.key(),
        wrapper_mint: ctx.accounts.wrapper_mint.key(),
        fee_receiver: ctx.accounts.fee_receiver_account.key(),
        deposit_fee_lamports: 0,
        fee_waived: Vec::with_capacity(MAX_FEE_WAIVED as usize),
        performance_fee_bp,
        target_reserve_ratio_bp,
        lower_bound_bp,
        upper_bound_bp,
        min_rebalance_interval,
        max_rebalance_interval,
        reserve_amount: 0,
        total_staked_amount: 0,
        connectors: Vec::with_capacity(MAX_CONNECTORS as usize),
        migrated_to: Pubkey::default(),
    });
    Ok(())
}
