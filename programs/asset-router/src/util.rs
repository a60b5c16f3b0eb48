use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::clock::Clock;

pub fn now_ts() -> u64 {
    Clock::get().unwrap().unix_timestamp as u64
}

pub fn check_reserve_config(
    target_reserve_ratio_bp: u16,
    lower_bound_bp: u16,
    upper_bound_bp: u16,
    min_rebalance_interval: u64,
    max_rebalance_interval: u64,
) -> Result<()> {
    require!(
        lower_bound_bp <= target_reserve_ratio_bp && target_reserve_ratio_bp <= upper_bound_bp,
        ErrorCode::InvalidReserveBounds
    );
    require!(
        upper_bound_bp <= shared_lib::BASIS_POINTS_100_PERCENT,
        ErrorCode::InvalidReserveBounds
    );
    require_gte!(
        max_rebalance_interval,
        min_rebalance_interval,
        ErrorCode::InvalidRebalanceIntervals
    );
    Ok(())
}
