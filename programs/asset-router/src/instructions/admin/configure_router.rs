use crate::util::check_reserve_config;
use crate::{error::ErrorCode, state::RouterState, MAX_FEE_WAIVED, MAX_PERFORMANCE_FEE_BP};
use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

#[derive(Accounts)]
pub struct SetReserveConfig<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,
}
pub fn handle_set_reserve_config(
    ctx: Context<SetReserveConfig>,
    target_reserve_ratio_bp: u16,
    lower_bound_bp: u16,
    upper_bound_bp: u16,
    min_rebalance_interval: u64,
    max_rebalance_interval: u64,
) -> Result<()> {
    check_reserve_config(
        target_reserve_ratio_bp,
        lower_bound_bp,
        upper_bound_bp,
        min_rebalance_interval,
        max_rebalance_interval,
    )?;
    let state = &mut ctx.accounts.router_state;
    state.target_reserve_ratio_bp = target_reserve_ratio_bp;
    state.lower_bound_bp = lower_bound_bp;
    state.upper_bound_bp = upper_bound_bp;
    state.min_rebalance_interval = min_rebalance_interval;
    state.max_rebalance_interval = max_rebalance_interval;

    emit!(crate::events::SetReserveConfigEvent {
        router_state: state.key(),
        target_reserve_ratio_bp,
        lower_bound_bp,
        upper_bound_bp,
        min_rebalance_interval,
        max_rebalance_interval,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetPerformanceFee<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,
}
pub fn handle_set_performance_fee(ctx: Context<SetPerformanceFee>, bp: u16) -> Result<()> {
    require_gte!(MAX_PERFORMANCE_FEE_BP, bp, ErrorCode::PerformanceFeeOverLimit);
    ctx.accounts.router_state.performance_fee_bp = bp;
    emit!(crate::events::SetPerformanceFeeEvent {
        router_state: ctx.accounts.router_state.key(),
        performance_fee_bp: bp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetFeeReceiver<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin, has_one = underlying_mint)]
    pub router_state: Account<'info, RouterState>,

    /// CHECK: only used to validate the token account below
    pub underlying_mint: UncheckedAccount<'info>,

    #[account(token::mint = underlying_mint)]
    pub fee_receiver_account: Account<'info, TokenAccount>,
}
pub fn handle_set_fee_receiver(ctx: Context<SetFeeReceiver>) -> Result<()> {
    ctx.accounts.router_state.fee_receiver = ctx.accounts.fee_receiver_account.key();
    Ok(())
}

#[derive(Accounts)]
pub struct SetDepositFee<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,
}
pub fn handle_set_deposit_fee(ctx: Context<SetDepositFee>, lamports: u64) -> Result<()> {
    ctx.accounts.router_state.deposit_fee_lamports = lamports;
    Ok(())
}

pub fn handle_set_fee_waived(ctx: Context<SetDepositFee>, list: Vec<Pubkey>) -> Result<()> {
    require_gte!(
        MAX_FEE_WAIVED as usize,
        list.len(),
        ErrorCode::FeeWaivedListTooLong
    );
    ctx.accounts.router_state.fee_waived = list;
    Ok(())
}

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    #[account()]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,
}
pub fn handle_transfer_ownership(ctx: Context<TransferOwnership>, new_admin: Pubkey) -> Result<()> {
    let old_admin = ctx.accounts.router_state.admin;
    ctx.accounts.router_state.admin = new_admin;
    emit!(crate::events::OwnershipTransferredEvent {
        router_state: ctx.accounts.router_state.key(),
        old_admin,
        new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct CollectDepositFees<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(mut, has_one = admin)]
    pub router_state: Account<'info, RouterState>,
}
/// move the accumulated lamport side-payments to the admin,
/// leaving the state account rent-exempt
pub fn handle_collect_deposit_fees(ctx: Context<CollectDepositFees>) -> Result<()> {
    let state_info = ctx.accounts.router_state.to_account_info();
    let rent_exempt = Rent::get()?.minimum_balance(state_info.data_len());
    let collectable = state_info.lamports().saturating_sub(rent_exempt);
    if collectable > 0 {
        let mut state_lamports = state_info.lamports.borrow_mut();
        let admin_info = ctx.accounts.admin.to_account_info();
        let mut admin_lamports = admin_info.lamports.borrow_mut();
        **admin_lamports += collectable;
        **state_lamports -= collectable;
    }
    Ok(())
}
